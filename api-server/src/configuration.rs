// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_STS_TIMEOUT_SECS};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ServerOptions {
    #[arg(long, default_value = "127.0.0.1", env("PHAROS_HTTP_HOST"))]
    pub host: String,
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env("PHAROS_HTTP_PORT"))]
    pub port: u16,
    /// Comma separated ARNs allowed to perform every operation.
    #[arg(long, env("ADMIN_ACCESS_ROLES"), value_delimiter = ',')]
    pub admin_access_roles: Vec<String>,
    #[arg(long, env("READ_ACCESS_ROLES"), value_delimiter = ',')]
    pub read_access_roles: Vec<String>,
    #[arg(long, env("WRITE_ACCESS_ROLES"), value_delimiter = ',')]
    pub write_access_roles: Vec<String>,
    #[arg(long, default_value_t = DEFAULT_STS_TIMEOUT_SECS, env("PHAROS_STS_TIMEOUT_SECS"))]
    pub sts_timeout_secs: u64,
    #[arg(long, default_value = "false", env("PHAROS_ALLOW_CHINA_PARTITION"), action = ArgAction::SetTrue)]
    pub allow_china_partition: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        ServerOptions {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_HTTP_PORT,
            admin_access_roles: Vec::new(),
            read_access_roles: Vec::new(),
            write_access_roles: Vec::new(),
            sts_timeout_secs: DEFAULT_STS_TIMEOUT_SECS,
            allow_china_partition: false,
        }
    }
}

impl ServerOptions {
    pub fn sts_timeout(&self) -> Duration {
        Duration::from_secs(self.sts_timeout_secs)
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::new(
            &self.admin_access_roles,
            &self.read_access_roles,
            &self.write_access_roles,
        )
    }
}

/// An immutable list of canonical ARNs. Membership is exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(Arc<[String]>);

impl AllowList {
    pub fn contains(&self, canonical_arn: &str) -> bool {
        self.0.iter().any(|arn| arn == canonical_arn)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut arns: Vec<String> = Vec::new();
        for arn in iter {
            let arn = arn.as_ref().trim();
            if !arn.is_empty() && !arns.iter().any(|existing| existing == arn) {
                arns.push(arn.to_string());
            }
        }
        Self(arns.into())
    }
}

/// The three permission tiers. Admin ARNs are folded into Read and Write
/// here, so request-time checks only ever consult a single list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    pub admin: AllowList,
    pub read: AllowList,
    pub write: AllowList,
}

impl Permissions {
    pub fn new<S: AsRef<str>>(admin: &[S], read: &[S], write: &[S]) -> Self {
        Self {
            admin: admin.iter().collect(),
            read: read.iter().chain(admin).collect(),
            write: write.iter().chain(admin).collect(),
        }
    }
}
