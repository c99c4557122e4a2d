// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::time::Duration;

/// Version prefix carried by every token.
pub const TOKEN_PREFIX: &str = "pharos-v1.";

/// STS hostnames in the commercial and GovCloud partitions.
pub const STS_HOST_PATTERN: &str = r"^sts(\.[a-z1-9\-]+)?\.amazonaws\.com$";
/// STS hostnames in the China partition, only honoured when enabled.
pub const STS_CHINA_HOST_PATTERN: &str = r"^sts(\.[a-z1-9\-]+)?\.amazonaws\.com\.cn$";

pub const STS_SERVICE_NAME: &str = "sts";
pub const STS_GLOBAL_ENDPOINT: &str = "https://sts.amazonaws.com/";
pub const STS_GLOBAL_SIGNING_REGION: &str = "us-east-1";
pub const STS_API_VERSION: &str = "2011-06-15";
pub const GET_CALLER_IDENTITY_ACTION: &str = "GetCallerIdentity";

/// Only influences `X-Amz-Expires`; STS honours signatures for 15 minutes
/// after `X-Amz-Date` regardless of this value.
pub const PRESIGN_EXPIRES_IN: Duration = Duration::from_secs(60);
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub const ASSUME_ROLE_SESSION_NAME: &str = "pharos";
