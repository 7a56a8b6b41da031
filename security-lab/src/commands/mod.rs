// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod generate;
pub mod invoke;
pub mod template;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "security-lab";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const GENERATE: &str = "generate";
pub const INVOKE: &str = "invoke";
pub const TEMPLATE: &str = "template";
// Global arguments
pub const VERBOSE: (&str, char) = ("verbose", 'v');
// Arguments for generate
pub const LENGTH: (&str, char) = ("length", 'l');
// Arguments for invoke
pub const EVENT: (&str, char) = ("event", 'e');
// Arguments for template
pub const CONFIG: (&str, char) = ("config", 'c');
pub const OUTPUT: (&str, char) = ("output", 'o');
pub const PRINT_JSON: (&str, char) = ("print-json", 'j');

pub const SUCCESS_STATUS_CODE: i32 = 0;
pub const ERROR_STATUS_CODE: i32 = 5;
pub const FAILURE_STATUS_CODE: i32 = 19;
