// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use lambda_runtime::{Context, Error};
use log::{self, error, info, warn};
use reqwest::header::CONTENT_TYPE;
use security_lab::custom_resource::{respond, CustomResourceRequest, CustomResourceResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub body: String,
}

// Implement Display for the Failure response so that we can then implement Error.
impl std::fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

// Implement Error for the FailureResponse so that we can `?` (try) the Response
// returned by `lambda_runtime::run(func).await` in `fn main`.
impl std::error::Error for FailureResponse {}

/// Delivers the response document back to CloudFormation.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send(&self, url: &str, response: &CustomResourceResponse) -> Result<(), Error>;
}

/// PUTs the response to the pre-signed S3 URL CloudFormation handed out in
/// the event.
#[derive(Debug, Default, Clone)]
pub struct HttpResponder {
    client: reqwest::Client,
}

impl HttpResponder {
    pub fn new(client: reqwest::Client) -> Self {
        HttpResponder { client }
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn send(&self, url: &str, response: &CustomResourceResponse) -> Result<(), Error> {
        let body = serde_json::to_string(response)?;

        // The URL is signed without a content type, so the header must be empty.
        let reply = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .map_err(|err| {
                // In case of failure, log a detailed error to CloudWatch.
                error!(
                    "failed to send response for '{}' with error: {}",
                    &response.logical_resource_id, err
                );
                FailureResponse {
                    body: "The lambda encountered an error and the response was not delivered"
                        .to_owned(),
                }
            })?;

        let status = reply.status();
        if !status.is_success() {
            error!(
                "CloudFormation rejected the response for '{}' with status {}",
                &response.logical_resource_id, status
            );
            return Err(FailureResponse {
                body: format!("Response upload failed with status {}", status),
            }
            .into());
        }

        info!(
            "Reported {:?} for '{}' to CloudFormation",
            response.status, &response.logical_resource_id
        );
        Ok(())
    }
}

pub async fn process_event<R: Responder + ?Sized>(
    e: CustomResourceRequest,
    c: Context,
    responder: &R,
) -> Result<CustomResourceResponse, Error> {
    info!(
        "Invocation {} is a {} request for [{}]",
        &c.request_id, e.request_type, &e.logical_resource_id
    );

    let response = respond(&e);
    if let Some(reason) = &response.reason {
        warn!("Reporting failure for [{}]: {}", &e.logical_resource_id, reason);
    }

    if e.response_url.is_empty() {
        warn!("Event carries no ResponseURL, returning the response to the caller only");
    } else {
        responder.send(&e.response_url, &response).await?;
    }

    Ok(response)
}
