// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Pharos Token
//!
//! Proves an AWS IAM identity to a remote API without sharing long-lived
//! secrets.
//!
//! A client presigns an `sts:GetCallerIdentity` request with its ambient AWS
//! credentials and sends the presigned URL as a bearer token. The server
//! validates the URL, replays it against STS and learns who signed it.
//!
//! ```text
//! client: credentials -> Presigner -> Generator -> "pharos-v1.<base64url>"
//!                                                        |
//! server: Verifier -> checks -> GET https://sts...amazonaws.com/?... -> Identity
//! ```
//!
//! ## Modules
//!
//! - [`arn`]: ARN parsing and canonicalization of assumed-role sessions
//! - [`codec`]: token wire format
//! - [`constants`]: prefix, host patterns and timeouts
//! - [`errors`]: error taxonomy shared by generation and verification
//! - [`generator`]: token issuance, SigV4 presigning via `aws-config`
//! - [`identity`]: the verified principal and the STS response envelope
//! - [`verifier`]: token validation and replay
//!
//! ## Security Considerations
//!
//! - Tokens carry no expiry field; STS rejects them ~15 minutes after
//!   `X-Amz-Date`
//! - The host allow-list runs before any network I/O, so forged tokens
//!   cannot point the server at arbitrary hosts
//! - Only `GetCallerIdentity` is replayed; other signed actions are refused
//! - Verification results are never cached

pub mod arn;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod identity;
pub mod verifier;

pub use errors::{ArnError, TokenError};
pub use generator::{Generator, Presigner, SigV4Presigner};
pub use identity::Identity;
pub use verifier::{HostPolicy, HttpsTransport, StsTransport, TokenVerifier, Verifier};
