// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches};
use log::info;
use std::fs::File;
use std::io::{BufReader, Write};

use crate::command::Command;
use crate::commands::{CONFIG, ERROR_STATUS_CODE, OUTPUT, PRINT_JSON, SUCCESS_STATUS_CODE, TEMPLATE};
use crate::errors::{Error, Result};
use crate::template::{LabConfig, Template};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct RenderTemplate {}

#[allow(clippy::new_without_default)]
impl RenderTemplate {
    pub fn new() -> Self {
        RenderTemplate {}
    }
}

impl Command for RenderTemplate {
    fn name(&self) -> &'static str {
        TEMPLATE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(TEMPLATE)
            .about("Renders the CloudFormation template of the security lab stack.")
            .arg(
                Arg::new(CONFIG.0)
                    .long(CONFIG.0)
                    .short(CONFIG.1)
                    .help("Provide a YAML or JSON lab configuration file")
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(OUTPUT.0)
                    .long(OUTPUT.0)
                    .short(OUTPUT.1)
                    .help("Write to output file")
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(PRINT_JSON.0)
                    .long(PRINT_JSON.0)
                    .short(PRINT_JSON.1)
                    .action(ArgAction::SetTrue)
                    .help("Print output in JSON format, YAML otherwise"),
            )
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, _: &mut Reader) -> Result<i32> {
        let config = match app.get_one::<String>(CONFIG.0) {
            Some(file) => match LabConfig::from_reader(BufReader::new(File::open(file)?)) {
                Ok(config) => config,
                Err(e) => {
                    writer.write_err(format!("Parsing error handling config file {file}, Error = {e}"))?;
                    return Ok(ERROR_STATUS_CODE);
                }
            },
            None => LabConfig::default(),
        };

        let template = match Template::security_lab(&config) {
            Ok(template) => template,
            Err(e @ Error::InvalidLength(_)) => {
                writer.write_err(format!("Invalid lab configuration, Error = {e}"))?;
                return Ok(ERROR_STATUS_CODE);
            }
            Err(e) => return Err(e),
        };

        let rendered = if app.get_flag(PRINT_JSON.0) {
            template.to_json()? + "\n"
        } else {
            template.to_yaml()?
        };

        match app.get_one::<String>(OUTPUT.0) {
            Some(path) => {
                File::create(path)?.write_all(rendered.as_bytes())?;
                info!("Wrote {} template to {}", config.name_prefix, path);
            }
            None => write!(writer, "{}", rendered)?,
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
