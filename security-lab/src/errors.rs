// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Requested string length must be a positive integer, got `{0}`")]
    InvalidLength(i64),
    #[error("Requested string length `{0}` is not an integer")]
    InvalidStringLength(String),
    #[error("Required property `{0}` is missing from the request")]
    MissingProperty(String),
    #[error("Error parsing incoming JSON context {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error parsing incoming YAML context {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("I/O error when reading {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<R> = std::result::Result<R, Error>;
