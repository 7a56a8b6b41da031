// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction};
use log::{trace, LevelFilter};
use security_lab::command::Command;
use security_lab::commands::{APP_NAME, APP_VERSION, VERBOSE};
use security_lab::utils::get_lab_commands;
use security_lab::utils::reader::{ReadBuffer, Reader};
use security_lab::utils::writer::{WriteBuffer::Stderr, WriteBuffer::Stdout, Writer};
use security_lab::Error;
use simple_logger::SimpleLogger;
use std::collections::HashMap;
use std::process::exit;

fn main() -> Result<(), Error> {
    let mut app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Tooling for the security services lab stack. Renders the CloudFormation
  template that provisions the lab (logging bucket, CloudTrail trail, security
  administrator and operator roles, Inspector assessment pipeline) and runs the
  random string custom resource that keeps its resource names unique."#,
        )
        .arg(
            Arg::new(VERBOSE.0)
                .long(VERBOSE.0)
                .short(VERBOSE.1)
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity - add v's to increase output"),
        )
        .arg_required_else_help(true);

    let commands: Vec<Box<dyn Command>> = get_lab_commands();

    let mappings = commands.iter().map(|s| (s.name(), s)).fold(
        HashMap::with_capacity(commands.len()),
        |mut map, entry| {
            map.insert(entry.0, entry.1.as_ref());
            map
        },
    );

    for each in &commands {
        app = app.subcommand(each.command());
    }

    let help = app.render_usage();
    let app = app.get_matches();

    let level = match app.get_count(VERBOSE.0) {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Unable to initialize logging {e}");
    }
    trace!("Arguments are {:?}", app);

    match app.subcommand() {
        Some((name, value)) => {
            if let Some(command) = mappings.get(name) {
                let mut output_writer =
                    Writer::new(Stdout(std::io::stdout()), Stderr(std::io::stderr()));

                match (*command).execute(
                    value,
                    &mut output_writer,
                    &mut Reader::new(ReadBuffer::Stdin(std::io::stdin())),
                ) {
                    Err(e) => {
                        output_writer
                            .write_err(format!("Error occurred {e}"))
                            .expect("failed to write to stderr");

                        exit(-1);
                    }
                    Ok(code) => exit(code),
                }
            } else {
                println!("{}", help);
            }
        }
        None => {
            println!("{}", help);
        }
    }

    Ok(())
}
