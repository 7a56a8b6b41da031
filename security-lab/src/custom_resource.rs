// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! CloudFormation custom resource protocol for `Custom::RandomString`.

use indexmap::IndexMap;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::errors::{Error, Result};
use crate::random::{generate_with, StringLength};

/// Name of the attribute holding the generated value, read in templates
/// with `Fn::GetAtt [<LogicalId>, RandomString]`.
pub const RANDOM_STRING_ATTRIBUTE: &str = "RandomString";
pub const STRING_LENGTH_PROPERTY: &str = "StringLength";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl Display for RequestType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestType::Create => "Create",
            RequestType::Update => "Update",
            RequestType::Delete => "Delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_length: Option<Value>,
}

impl ResourceProperties {
    /// `StringLength` arrives string-encoded from CloudFormation. Plain JSON
    /// integers are accepted for direct invocations.
    pub fn string_length(&self) -> Result<StringLength> {
        match &self.string_length {
            None | Some(Value::Null) => {
                Err(Error::MissingProperty(STRING_LENGTH_PROPERTY.to_string()))
            }
            Some(Value::String(text)) => text.parse(),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(value) => StringLength::try_from(value),
                None => Err(Error::InvalidStringLength(number.to_string())),
            },
            Some(other) => Err(Error::InvalidStringLength(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceRequest {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL", default)]
    pub response_url: String,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub logical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: ResourceProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<ResourceProperties>,
}

impl CustomResourceRequest {
    /// The id CloudFormation tracks the resource by. Kept stable across
    /// updates so that an update never triggers a replacement.
    pub fn physical_resource_id(&self) -> String {
        match &self.physical_resource_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("{}-{}", self.logical_resource_id, self.request_id),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Generated(String),
    Deleted,
    Failed(Error),
}

pub fn handle<R: Rng + ?Sized>(request: &CustomResourceRequest, rng: &mut R) -> Outcome {
    match request.request_type {
        RequestType::Delete => Outcome::Deleted,
        RequestType::Create | RequestType::Update => {
            match request.resource_properties.string_length() {
                Ok(length) => Outcome::Generated(generate_with(rng, length)),
                Err(e) => Outcome::Failed(e),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub no_echo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, String>>,
}

impl CustomResourceResponse {
    pub fn new(request: &CustomResourceRequest, outcome: Outcome) -> Self {
        let (status, reason, data) = match outcome {
            Outcome::Generated(value) => {
                let mut data = IndexMap::with_capacity(1);
                data.insert(RANDOM_STRING_ATTRIBUTE.to_string(), value);
                (ResponseStatus::Success, None, Some(data))
            }
            Outcome::Deleted => (ResponseStatus::Success, None, None),
            Outcome::Failed(e) => (ResponseStatus::Failed, Some(e.to_string()), None),
        };

        CustomResourceResponse {
            status,
            reason,
            physical_resource_id: request.physical_resource_id(),
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }

    pub fn random_string(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get(RANDOM_STRING_ATTRIBUTE))
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Runs the handler with the thread local generator and builds the document
/// to send back to CloudFormation.
pub fn respond(request: &CustomResourceRequest) -> CustomResourceResponse {
    info!(
        "Handling {} for {} ({})",
        request.request_type, request.logical_resource_id, request.resource_type
    );

    let outcome = handle(request, &mut rand::thread_rng());
    match &outcome {
        Outcome::Generated(value) => debug!("Generated random string {}", value),
        Outcome::Deleted => debug!("Nothing to clean up for {}", request.logical_resource_id),
        Outcome::Failed(e) => info!("Request {} failed: {}", request.request_id, e),
    }

    CustomResourceResponse::new(request, outcome)
}

#[cfg(test)]
#[path = "custom_resource_tests.rs"]
mod custom_resource_tests;
