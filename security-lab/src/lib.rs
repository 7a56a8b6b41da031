// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod commands;
pub mod custom_resource;
mod errors;
pub mod random;
pub mod template;
pub mod utils;

pub use crate::errors::{Error, Result};
pub use crate::random::{generate, StringLength};
