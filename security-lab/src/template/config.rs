// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::errors::Result;

pub const DEFAULT_NAME_PREFIX: &str = "security-lab";
pub const DEFAULT_RANDOM_STRING_LENGTH: i64 = 12;
pub const DEFAULT_LAMBDA_CODE_KEY: &str = "security-lab-lambda.zip";
pub const DEFAULT_LOG_EXPIRATION_DAYS: u32 = 1;
pub const DEFAULT_ASSESSMENT_DURATION_SECONDS: u32 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Knobs of the lab stack. Every field has a default, so an empty document
/// (or no document at all) yields the standard lab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LabConfig {
    pub name_prefix: String,
    pub random_string_length: i64,
    pub lambda_code_bucket: String,
    pub lambda_code_key: String,
    pub log_expiration_days: u32,
    pub assessment_duration_seconds: u32,
    pub administrator_managed_policies: Vec<String>,
    pub operator_managed_policies: Vec<String>,
    pub inspector_tag: Tag,
}

impl Default for LabConfig {
    fn default() -> Self {
        LabConfig {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            random_string_length: DEFAULT_RANDOM_STRING_LENGTH,
            lambda_code_bucket: String::new(),
            lambda_code_key: DEFAULT_LAMBDA_CODE_KEY.to_string(),
            log_expiration_days: DEFAULT_LOG_EXPIRATION_DAYS,
            assessment_duration_seconds: DEFAULT_ASSESSMENT_DURATION_SECONDS,
            administrator_managed_policies: vec![
                aws_managed_policy("SecurityAudit"),
                aws_managed_policy("AWSCloudTrail_FullAccess"),
                aws_managed_policy("AmazonInspectorFullAccess"),
            ],
            operator_managed_policies: vec![
                aws_managed_policy("SecurityAudit"),
                aws_managed_policy("AWSCloudTrail_ReadOnlyAccess"),
                aws_managed_policy("AmazonInspectorReadOnlyAccess"),
            ],
            inspector_tag: Tag {
                key: String::from("SecurityLab"),
                value: String::from("Inspect"),
            },
        }
    }
}

impl LabConfig {
    /// Reads a YAML or JSON document. JSON parses as YAML, so one path
    /// covers both.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        if content.trim().is_empty() {
            return Ok(LabConfig::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

pub fn aws_managed_policy(name: &str) -> String {
    format!("arn:aws:iam::aws:policy/{}", name)
}
