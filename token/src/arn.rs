// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! ARN canonicalization.
//!
//! Supported principals:
//!
//! | Principal | Example | Canonical form |
//! |-----------|---------|----------------|
//! | Account root | `arn:aws:iam::123456789012:root` | unchanged |
//! | IAM user | `arn:aws:iam::123456789012:user/Bob` | unchanged |
//! | IAM role | `arn:aws:iam::123456789012:role/S3Access` | unchanged |
//! | Assumed role | `arn:aws:sts::123456789012:assumed-role/Accounting-Role/Mary` | `arn:aws:iam::123456789012:role/Accounting-Role` |
//! | Federated user | `arn:aws:sts::123456789012:federated-user/Bob` | unchanged |

use std::str::FromStr;

use crate::errors::ArnError;

/// AWS partitions that may issue identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Aws,
    AwsCn,
    AwsUsGov,
}

impl FromStr for Partition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(Self::Aws),
            "aws-cn" => Ok(Self::AwsCn),
            "aws-us-gov" => Ok(Self::AwsUsGov),
            _ => Err(()),
        }
    }
}

/// The sections of `arn:partition:service:region:account:resource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account_id: &'a str,
    /// May itself contain `:` and `/`.
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    pub fn parse(arn: &'a str) -> Result<Self, ArnError> {
        let invalid = || ArnError::Invalid(arn.to_string());

        let mut sections = arn.splitn(6, ':');
        if sections.next() != Some("arn") {
            return Err(invalid());
        }

        let partition = sections.next().ok_or_else(invalid)?;
        let service = sections.next().ok_or_else(invalid)?;
        let region = sections.next().ok_or_else(invalid)?;
        let account_id = sections.next().ok_or_else(invalid)?;
        let resource = sections.next().ok_or_else(invalid)?;

        Ok(Self {
            partition,
            service,
            region,
            account_id,
            resource,
        })
    }
}

/// Validates that `arn` names a supported principal and collapses STS
/// assumed-role sessions onto the IAM role they were assumed from.
pub fn canonicalize(arn: &str) -> Result<String, ArnError> {
    let parsed = Arn::parse(arn)?;

    if parsed.partition.parse::<Partition>().is_err() {
        return Err(ArnError::UnrecognizedPartition(arn.to_string()));
    }

    let parts: Vec<&str> = parsed.resource.split('/').collect();
    let resource_type = parts[0];

    match parsed.service {
        "sts" => match resource_type {
            "federated-user" => Ok(arn.to_string()),
            "assumed-role" => {
                if parts.len() < 3 {
                    return Err(ArnError::AssumedRoleWithoutRole(arn.to_string()));
                }
                // Role names may carry a path; the last segment is the session name.
                let role = parts[1..parts.len() - 1].join("/");
                Ok(format!(
                    "arn:{}:iam::{}:role/{}",
                    parsed.partition, parsed.account_id, role
                ))
            }
            _ => Err(ArnError::UnrecognizedStsResource(
                parsed.resource.to_string(),
            )),
        },
        "iam" => match resource_type {
            "role" | "user" | "root" => Ok(arn.to_string()),
            _ => Err(ArnError::UnrecognizedIamResource(
                parsed.resource.to_string(),
            )),
        },
        service => Err(ArnError::InvalidService {
            service: service.to_string(),
            arn: arn.to_string(),
        }),
    }
}
