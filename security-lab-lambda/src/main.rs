// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use lambda_runtime::{handler_fn, Context, Error};
use log::LevelFilter;
use security_lab::custom_resource::CustomResourceRequest;
use security_lab_lambda::{process_event, HttpResponder};
use simple_logger::SimpleLogger;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    SimpleLogger::new().with_level(LevelFilter::Info).init().unwrap();

    let responder = Arc::new(HttpResponder::default());
    let func = handler_fn(move |e: CustomResourceRequest, c: Context| {
        let responder = Arc::clone(&responder);
        async move { process_event(e, c, responder.as_ref()).await }
    });
    lambda_runtime::run(func).await?;
    Ok(())
}
