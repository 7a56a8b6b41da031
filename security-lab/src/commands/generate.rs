// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches};
use log::info;
use std::io::Write;

use crate::command::Command;
use crate::commands::{ERROR_STATUS_CODE, GENERATE, LENGTH, SUCCESS_STATUS_CODE};
use crate::errors::{Error, Result};
use crate::random::{self, StringLength};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Generate {}

#[allow(clippy::new_without_default)]
impl Generate {
    pub fn new() -> Self {
        Generate {}
    }
}

impl Command for Generate {
    fn name(&self) -> &'static str {
        GENERATE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(GENERATE)
            .about("Prints a random string drawn from the letters a-z and A-Z.")
            .arg(
                Arg::new(LENGTH.0)
                    .long(LENGTH.0)
                    .short(LENGTH.1)
                    .help("Number of characters to generate, must be positive")
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true)
                    .required(true),
            )
            .arg_required_else_help(true)
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, _: &mut Reader) -> Result<i32> {
        let length = match app.get_one::<String>(LENGTH.0) {
            Some(length) => length,
            None => return Err(Error::MissingProperty(LENGTH.0.to_string())),
        };

        let generated = length
            .parse::<StringLength>()
            .map(|length| random::generate_with(&mut rand::thread_rng(), length));

        match generated {
            Ok(value) => {
                info!("Generated random string of length {}", value.len());
                writeln!(writer, "{}", value)?;
                Ok(SUCCESS_STATUS_CODE)
            }
            Err(e @ Error::InvalidLength(_)) | Err(e @ Error::InvalidStringLength(_)) => {
                writer.write_err(format!("Unable to generate string, Error = {e}"))?;
                Ok(ERROR_STATUS_CODE)
            }
            Err(e) => Err(e),
        }
    }
}
