// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Error types for token generation, verification and ARN canonicalization.
//!
//! Every verification stage fails closed with one of the [`TokenError`]
//! variants below. The distinctions are meant for logs and metrics; callers
//! facing untrusted clients should collapse them into a single outcome.

/// Failures of [`canonicalize`](crate::arn::canonicalize).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArnError {
    #[error("arn '{0}' is invalid")]
    Invalid(String),
    #[error("arn '{0}' does not have a recognized partition")]
    UnrecognizedPartition(String),
    #[error("assumed-role arn '{0}' does not have a role")]
    AssumedRoleWithoutRole(String),
    #[error("unrecognized resource {0} for service sts")]
    UnrecognizedStsResource(String),
    #[error("unrecognized resource {0} for service iam")]
    UnrecognizedIamResource(String),
    #[error("service {service} in arn {arn} is not a valid service for identities")]
    InvalidService { service: String, arn: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token failed structural validation.
    #[error("malformed token: {0}")]
    MalformedToken(String),
    /// The embedded request violates a security invariant.
    #[error("untrusted request: {0}")]
    UntrustedRequest(String),
    /// STS could not be reached or the response could not be read.
    #[error("AWS STS unavailable: {0}")]
    UpstreamUnavailable(String),
    /// STS answered but refused the signed request.
    #[error("AWS STS error (expected HTTP 200, got HTTP {status})")]
    UpstreamRejected { status: u16 },
    #[error("malformed AWS STS response: {0}")]
    MalformedResponse(String),
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] ArnError),
    /// No presigned request could be produced (e.g. no ambient credentials).
    #[error("failed to presign request: {0}")]
    Signing(String),
    #[error("failed to build HTTP client: {0}")]
    Transport(String),
}

impl TokenError {
    /// Whether the failure points at a tampered or forged token.
    pub fn is_suspicious(&self) -> bool {
        matches!(self, Self::UntrustedRequest(_))
    }

    /// Whether the failure needs operator attention rather than a new token.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::MalformedResponse(_) | Self::Transport(_)
        )
    }
}
