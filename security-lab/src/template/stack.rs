// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use log::debug;
use serde_json::{json, Value};

use super::config::{aws_managed_policy, LabConfig};
use super::regions::{
    all_rules_packages, supported_regions, CIS, CVE, NETWORK_REACHABILITY,
    SECURITY_BEST_PRACTICES,
};
use super::{find_in_map, get_att, reference, sub, switch_role_url, Output, Resource, Template};
use crate::custom_resource::{RANDOM_STRING_ATTRIBUTE, STRING_LENGTH_PROPERTY};
use crate::errors::Result;
use crate::random::StringLength;

//
// Logical ids
//
pub const LAMBDA_CODE_BUCKET: &str = "LambdaCodeBucket";
pub const LAMBDA_CODE_KEY: &str = "LambdaCodeKey";
pub const INSPECTOR_RULES_PACKAGES: &str = "InspectorRulesPackages";
pub const SUPPORTED_REGION_RULE: &str = "SupportedRegion";

pub const RANDOM_STRING_FUNCTION_ROLE: &str = "RandomStringFunctionRole";
pub const RANDOM_STRING_FUNCTION: &str = "RandomStringFunction";
pub const RANDOM_STRING: &str = "RandomString";
pub const LOGGING_BUCKET: &str = "LoggingBucket";
pub const LOGGING_BUCKET_POLICY: &str = "LoggingBucketPolicy";
pub const TRAIL: &str = "Trail";
pub const SECURITY_ADMINISTRATOR_POLICY: &str = "SecurityAdministratorPolicy";
pub const SECURITY_OPERATOR_POLICY: &str = "SecurityOperatorPolicy";
pub const SECURITY_ADMINISTRATOR_ROLE: &str = "SecurityAdministratorRole";
pub const SECURITY_OPERATOR_ROLE: &str = "SecurityOperatorRole";
pub const INSPECTOR_RESOURCE_GROUP: &str = "InspectorResourceGroup";
pub const ASSESSMENT_TARGET: &str = "AssessmentTarget";
pub const ASSESSMENT_TEMPLATE: &str = "AssessmentTemplate";

pub const ADMINISTRATOR_SWITCH_ROLE_URL: &str = "SecurityAdministratorSwitchRoleUrl";
pub const OPERATOR_SWITCH_ROLE_URL: &str = "SecurityOperatorSwitchRoleUrl";
pub const LOGGING_BUCKET_NAME: &str = "LoggingBucketName";

pub const CUSTOM_RANDOM_STRING_TYPE: &str = "Custom::RandomString";
pub const CLOUDTRAIL_SERVICE_PRINCIPAL: &str = "cloudtrail.amazonaws.com";

const DESCRIPTION: &str = "Security services lab: CloudTrail logging bucket and trail, security administrator and operator roles, and an Inspector assessment pipeline";

impl Template {
    /// The lab stack. Only the values in `config` vary between renders.
    ///
    /// Fails with `InvalidLength` when the configured random string length is
    /// not positive, the same check the custom resource applies at deploy time.
    pub fn security_lab(config: &LabConfig) -> Result<Template> {
        let length = StringLength::try_from(config.random_string_length)?;
        debug!(
            "Rendering {} stack with random string length {}",
            config.name_prefix, length
        );

        let regions = supported_regions().collect::<Vec<_>>();
        let mut template = Template::new(format!(
            "{} (Inspector rules packages are mapped for {} only)",
            DESCRIPTION,
            regions.join(", ")
        ));
        add_parameters(&mut template, config);
        add_region_rule(&mut template, &regions);
        template.mappings.insert(
            INSPECTOR_RULES_PACKAGES.to_string(),
            serde_json::to_value(all_rules_packages())?,
        );

        add_random_string(&mut template, length);
        add_logging(&mut template, config);
        add_roles(&mut template, config);
        add_inspector(&mut template, config);
        add_outputs(&mut template, config);

        Ok(template)
    }
}

fn add_parameters(template: &mut Template, config: &LabConfig) {
    let mut bucket = json!({
        "Type": "String",
        "Description": "S3 bucket holding the random string Lambda deployment package",
    });
    if !config.lambda_code_bucket.is_empty() {
        bucket["Default"] = Value::from(config.lambda_code_bucket.as_str());
    }
    template
        .parameters
        .insert(LAMBDA_CODE_BUCKET.to_string(), bucket);
    template.parameters.insert(
        LAMBDA_CODE_KEY.to_string(),
        json!({
            "Type": "String",
            "Description": "S3 key of the random string Lambda deployment package",
            "Default": config.lambda_code_key,
        }),
    );
}

/// Stops stack creation up front in regions the rules package mapping does
/// not cover, instead of failing `Fn::FindInMap` halfway through the deploy.
fn add_region_rule(template: &mut Template, regions: &[&str]) {
    template.rules.insert(
        SUPPORTED_REGION_RULE.to_string(),
        json!({
            "Assertions": [{
                "Assert": { "Fn::Contains": [regions, reference("AWS::Region")] },
                "AssertDescription": format!(
                    "The lab deploys only to regions with Inspector rules packages: {}",
                    regions.join(", ")
                ),
            }]
        }),
    );
}

fn add_random_string(template: &mut Template, length: StringLength) {
    let resources = &mut template.resources;
    resources.insert(
        RANDOM_STRING_FUNCTION_ROLE.to_string(),
        Resource::new(
            "AWS::IAM::Role",
            json!({
                "AssumeRolePolicyDocument": assume_role_policy(json!({ "Service": "lambda.amazonaws.com" })),
                "ManagedPolicyArns": [
                    aws_managed_policy("service-role/AWSLambdaBasicExecutionRole")
                ],
            }),
        ),
    );
    resources.insert(
        RANDOM_STRING_FUNCTION.to_string(),
        Resource::new(
            "AWS::Lambda::Function",
            json!({
                "Description": "Generates random alphabetic strings for Custom::RandomString",
                "Runtime": "provided.al2023",
                "Handler": "bootstrap",
                "MemorySize": 128,
                "Timeout": 30,
                "Role": get_att(RANDOM_STRING_FUNCTION_ROLE, "Arn"),
                "Code": {
                    "S3Bucket": reference(LAMBDA_CODE_BUCKET),
                    "S3Key": reference(LAMBDA_CODE_KEY),
                },
            }),
        ),
    );

    let mut properties = json!({ "ServiceToken": get_att(RANDOM_STRING_FUNCTION, "Arn") });
    properties[STRING_LENGTH_PROPERTY] = Value::from(length.to_string());
    resources.insert(
        RANDOM_STRING.to_string(),
        Resource::new(CUSTOM_RANDOM_STRING_TYPE, properties),
    );
}

fn add_logging(template: &mut Template, config: &LabConfig) {
    let resources = &mut template.resources;
    // S3 rejects upper case bucket names, so the random suffix goes on the trail only.
    resources.insert(
        LOGGING_BUCKET.to_string(),
        Resource::new(
            "AWS::S3::Bucket",
            json!({
                "LifecycleConfiguration": {
                    "Rules": [{
                        "Id": "ExpireLabLogs",
                        "Status": "Enabled",
                        "ExpirationInDays": config.log_expiration_days,
                        "AbortIncompleteMultipartUpload": { "DaysAfterInitiation": 1 },
                    }]
                },
                "Tags": [{ "Key": "Project", "Value": config.name_prefix }],
            }),
        ),
    );
    resources.insert(
        LOGGING_BUCKET_POLICY.to_string(),
        Resource::new(
            "AWS::S3::BucketPolicy",
            json!({
                "Bucket": reference(LOGGING_BUCKET),
                "PolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [
                        {
                            "Sid": "AWSCloudTrailAclCheck",
                            "Effect": "Allow",
                            "Principal": { "Service": CLOUDTRAIL_SERVICE_PRINCIPAL },
                            "Action": "s3:GetBucketAcl",
                            "Resource": get_att(LOGGING_BUCKET, "Arn"),
                        },
                        {
                            "Sid": "AWSCloudTrailWrite",
                            "Effect": "Allow",
                            "Principal": { "Service": CLOUDTRAIL_SERVICE_PRINCIPAL },
                            "Action": "s3:PutObject",
                            "Resource": sub(&format!("${{{}.Arn}}/AWSLogs/${{AWS::AccountId}}/*", LOGGING_BUCKET)),
                            "Condition": {
                                "StringEquals": { "s3:x-amz-acl": "bucket-owner-full-control" }
                            },
                        }
                    ]
                },
            }),
        ),
    );
    resources.insert(
        TRAIL.to_string(),
        Resource::new(
            "AWS::CloudTrail::Trail",
            json!({
                "TrailName": sub(&unique_name(&config.name_prefix, "trail")),
                "S3BucketName": reference(LOGGING_BUCKET),
                "IsLogging": true,
                "IncludeGlobalServiceEvents": true,
                "IsMultiRegionTrail": false,
            }),
        )
        .depends_on(LOGGING_BUCKET_POLICY),
    );
}

fn add_roles(template: &mut Template, config: &LabConfig) {
    let log_objects = json!([
        get_att(LOGGING_BUCKET, "Arn"),
        sub(&format!("${{{}.Arn}}/*", LOGGING_BUCKET)),
    ]);
    let trail_arn = sub(&format!(
        "arn:${{AWS::Partition}}:cloudtrail:${{AWS::Region}}:${{AWS::AccountId}}:trail/${{{}}}",
        TRAIL
    ));

    let resources = &mut template.resources;
    resources.insert(
        SECURITY_ADMINISTRATOR_POLICY.to_string(),
        managed_policy(
            "Lets the security administrator run the lab trail and Inspector assessments",
            json!([
                {
                    "Sid": "ManageLabTrail",
                    "Effect": "Allow",
                    "Action": [
                        "cloudtrail:StartLogging",
                        "cloudtrail:StopLogging",
                        "cloudtrail:UpdateTrail",
                        "cloudtrail:PutEventSelectors",
                    ],
                    "Resource": trail_arn,
                },
                {
                    "Sid": "ManageInspectorAssessments",
                    "Effect": "Allow",
                    "Action": [
                        "inspector:CreateAssessmentTemplate",
                        "inspector:DeleteAssessmentRun",
                        "inspector:StartAssessmentRun",
                        "inspector:StopAssessmentRun",
                        "inspector:SubscribeToEvent",
                        "inspector:UnsubscribeFromEvent",
                    ],
                    "Resource": "*",
                },
                {
                    "Sid": "ReadLabLogs",
                    "Effect": "Allow",
                    "Action": ["s3:GetObject", "s3:ListBucket"],
                    "Resource": log_objects,
                }
            ]),
        ),
    );
    resources.insert(
        SECURITY_OPERATOR_POLICY.to_string(),
        managed_policy(
            "Lets the security operator read lab logs and start Inspector assessments",
            json!([
                {
                    "Sid": "LookupTrailEvents",
                    "Effect": "Allow",
                    "Action": "cloudtrail:LookupEvents",
                    "Resource": "*",
                },
                {
                    "Sid": "RunInspectorAssessments",
                    "Effect": "Allow",
                    "Action": ["inspector:StartAssessmentRun", "inspector:StopAssessmentRun"],
                    "Resource": "*",
                },
                {
                    "Sid": "ReadLabLogs",
                    "Effect": "Allow",
                    "Action": ["s3:GetObject", "s3:ListBucket"],
                    "Resource": log_objects,
                }
            ]),
        ),
    );
    resources.insert(
        SECURITY_ADMINISTRATOR_ROLE.to_string(),
        role(
            &config.administrator_managed_policies,
            SECURITY_ADMINISTRATOR_POLICY,
        ),
    );
    resources.insert(
        SECURITY_OPERATOR_ROLE.to_string(),
        role(&config.operator_managed_policies, SECURITY_OPERATOR_POLICY),
    );
}

fn add_inspector(template: &mut Template, config: &LabConfig) {
    let rules_package = |key: &str| {
        find_in_map(INSPECTOR_RULES_PACKAGES, reference("AWS::Region"), key)
    };

    let resources = &mut template.resources;
    resources.insert(
        INSPECTOR_RESOURCE_GROUP.to_string(),
        Resource::new(
            "AWS::Inspector::ResourceGroup",
            json!({ "ResourceGroupTags": [config.inspector_tag] }),
        ),
    );
    resources.insert(
        ASSESSMENT_TARGET.to_string(),
        Resource::new(
            "AWS::Inspector::AssessmentTarget",
            json!({
                "AssessmentTargetName": sub(&unique_name(&config.name_prefix, "target")),
                "ResourceGroupArn": reference(INSPECTOR_RESOURCE_GROUP),
            }),
        ),
    );
    resources.insert(
        ASSESSMENT_TEMPLATE.to_string(),
        Resource::new(
            "AWS::Inspector::AssessmentTemplate",
            json!({
                "AssessmentTargetArn": reference(ASSESSMENT_TARGET),
                "AssessmentTemplateName": sub(&unique_name(&config.name_prefix, "template")),
                "DurationInSeconds": config.assessment_duration_seconds,
                "RulesPackageArns": [
                    rules_package(CVE),
                    rules_package(CIS),
                    rules_package(NETWORK_REACHABILITY),
                    rules_package(SECURITY_BEST_PRACTICES),
                ],
            }),
        ),
    );
}

fn add_outputs(template: &mut Template, config: &LabConfig) {
    template.outputs.insert(
        ADMINISTRATOR_SWITCH_ROLE_URL.to_string(),
        Output {
            description: String::from("Console link to switch to the security administrator role"),
            value: switch_role_url(
                SECURITY_ADMINISTRATOR_ROLE,
                &format!("{} administrator", config.name_prefix),
            ),
        },
    );
    template.outputs.insert(
        OPERATOR_SWITCH_ROLE_URL.to_string(),
        Output {
            description: String::from("Console link to switch to the security operator role"),
            value: switch_role_url(
                SECURITY_OPERATOR_ROLE,
                &format!("{} operator", config.name_prefix),
            ),
        },
    );
    template.outputs.insert(
        LOGGING_BUCKET_NAME.to_string(),
        Output {
            description: String::from("Bucket receiving the lab trail logs"),
            value: reference(LOGGING_BUCKET),
        },
    );
}

/// `Fn::Sub` text for `<prefix>-<kind>-<random string>`.
fn unique_name(prefix: &str, kind: &str) -> String {
    format!(
        "{}-{}-${{{}.{}}}",
        prefix, kind, RANDOM_STRING, RANDOM_STRING_ATTRIBUTE
    )
}

fn assume_role_policy(principal: Value) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": principal,
            "Action": "sts:AssumeRole",
        }]
    })
}

fn managed_policy(description: &str, statements: Value) -> Resource {
    Resource::new(
        "AWS::IAM::ManagedPolicy",
        json!({
            "Description": description,
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": statements,
            },
        }),
    )
}

fn role(managed_policies: &[String], custom_policy: &str) -> Resource {
    let mut policy_arns = managed_policies
        .iter()
        .map(|arn| Value::from(arn.as_str()))
        .collect::<Vec<Value>>();
    policy_arns.push(reference(custom_policy));

    Resource::new(
        "AWS::IAM::Role",
        json!({
            "AssumeRolePolicyDocument": assume_role_policy(json!({
                "AWS": sub("arn:${AWS::Partition}:iam::${AWS::AccountId}:root")
            })),
            "ManagedPolicyArns": policy_arns,
        }),
    )
}
