// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Pharos API Server
//!
//! HTTP API serving Kubernetes cluster records to callers authenticated by
//! their AWS IAM identity.
//!
//! ## Architecture
//!
//! ```text
//! Client -> HTTP API -> authenticate -> authorize -> handler
//!                            |
//!                            +-> STS (GetCallerIdentity replay)
//! ```
//!
//! Clients send `Authorization: Bearer pharos-v1.<...>` tokens produced by
//! [`pharos_token::Generator`]. Each request is verified against STS; nothing
//! is cached, so revoked credentials stop working on the next request.
//!
//! ## Modules
//!
//! - [`application`]: router assembly and server setup
//! - [`authentication`]: bearer token middleware
//! - [`authorization`]: allow-list middleware
//! - [`clusters`]: in-process cluster registry
//! - [`configuration`]: CLI/environment options and permission tiers
//! - [`constants`]: configuration constants
//! - [`errors`]: application error type with HTTP response mapping
//! - [`models`]: request/response types with validation
//! - [`routes`]: HTTP route handlers
//!
//! ## Usage
//!
//! ```bash
//! ADMIN_ACCESS_ROLES=arn:aws:iam::123456789012:role/Admin \
//! READ_ACCESS_ROLES=arn:aws:iam::123456789012:role/Developer \
//! pharos-api-server --host 0.0.0.0 --port 7654
//! ```

pub mod application;
pub mod authentication;
pub mod authorization;
pub mod clusters;
pub mod configuration;
pub mod constants;
pub mod errors;
pub mod models;
pub mod routes;
