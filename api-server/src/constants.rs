// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

pub const AUTHORIZATION_SCHEME: &str = "Bearer ";

pub const DEFAULT_HTTP_PORT: u16 = 7654;
pub const DEFAULT_STS_TIMEOUT_SECS: u64 = 10;

// Validation constants for CreateCluster
pub const MAX_CLUSTER_ID_LENGTH: u64 = 256;
pub const MAX_ENVIRONMENT_LENGTH: u64 = 64;
pub const MAX_SERVER_URL_LENGTH: u64 = 2048;
pub const MAX_CLUSTER_AUTHORITY_DATA_LENGTH: u64 = 16 * 1024;
