// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use anyhow::Result;
use clap::Parser;
use pharos_token::{Generator, SigV4Presigner};
use tracing_subscriber::EnvFilter;

/// Prints a bearer token for the ambient AWS credentials.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct TokenOptions {
    #[arg(long, env("AWS_PROFILE"))]
    profile: Option<String>,
    #[arg(long, env("AWS_REGION"))]
    region: Option<String>,
    /// Role to assume before signing, e.g. from an EC2 instance.
    #[arg(long, env("PHAROS_ASSUME_ROLE_ARN"))]
    role_arn: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout only carries the token
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = TokenOptions::parse();

    tracing::debug!("[token] {:?}", &options);

    let presigner = SigV4Presigner::from_env(options.profile, options.region, options.role_arn).await?;
    let token = Generator::new(presigner).generate().await?;

    println!("{token}");

    Ok(())
}
