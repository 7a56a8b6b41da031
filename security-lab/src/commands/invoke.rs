// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches};
use std::fs::File;
use std::io::{BufReader, Read, Write};

use crate::command::Command;
use crate::commands::{
    ERROR_STATUS_CODE, EVENT, FAILURE_STATUS_CODE, INVOKE, SUCCESS_STATUS_CODE,
};
use crate::custom_resource::{respond, CustomResourceRequest};
use crate::errors::Result;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

/// Runs the `Custom::RandomString` handler against a CloudFormation event
/// locally and prints the response document instead of sending it.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Invoke {}

#[allow(clippy::new_without_default)]
impl Invoke {
    pub fn new() -> Self {
        Invoke {}
    }
}

impl Command for Invoke {
    fn name(&self) -> &'static str {
        INVOKE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(INVOKE)
            .about("Runs the random string custom resource handler on a CloudFormation event and prints the response.")
            .arg(
                Arg::new(EVENT.0)
                    .long(EVENT.0)
                    .short(EVENT.1)
                    .help("Provide a file holding the event JSON, read from stdin when absent")
                    .action(ArgAction::Set)
                    .required(false),
            )
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let mut file: Box<dyn Read> = match app.get_one::<String>(EVENT.0) {
            Some(file) => Box::new(BufReader::new(File::open(file)?)),
            None => Box::new(reader),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        let request: CustomResourceRequest = match serde_json::from_str(&content) {
            Ok(request) => request,
            Err(e) => {
                writer.write_err(format!("Parsing error handling event, Error = {e}"))?;
                return Ok(ERROR_STATUS_CODE);
            }
        };

        let response = respond(&request);
        serde_json::to_writer_pretty(&mut *writer, &response)?;
        writeln!(writer)?;

        if response.is_success() {
            Ok(SUCCESS_STATUS_CODE)
        } else {
            Ok(FAILURE_STATUS_CODE)
        }
    }
}
