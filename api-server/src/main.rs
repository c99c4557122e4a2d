// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pharos_api_server::application::Application;
use pharos_api_server::clusters::Clusters;
use pharos_api_server::configuration::ServerOptions;
use pharos_token::{HostPolicy, TokenVerifier, Verifier};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        .with_ansi(false)
        // remove the name of the function from every log entry
        .with_target(false)
        .init();

    // get configuration options from arguments or environment variables
    let options = ServerOptions::parse();

    tracing::info!("[api] {:?}", &options);

    let verifier: Arc<dyn Verifier> = Arc::new(TokenVerifier::https(
        options.sts_timeout(),
        HostPolicy {
            allow_china_partition: options.allow_china_partition,
        },
    )?);
    let clusters = Arc::new(Clusters::new());

    let application = Application::build(options, verifier, clusters).await?;

    application.run_until_stopped().await?;

    Ok(())
}
