// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use base64::{Engine as _, prelude::BASE64_STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    MAX_CLUSTER_AUTHORITY_DATA_LENGTH, MAX_CLUSTER_ID_LENGTH, MAX_ENVIRONMENT_LENGTH,
    MAX_SERVER_URL_LENGTH,
};

/// A Kubernetes cluster registered with the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub environment: String,
    pub server_url: String,
    /// Base64 encoded CA bundle of the cluster's API server.
    pub cluster_authority_data: String,
    pub deleted: bool,
    /// At most one non-deleted cluster per environment is active.
    pub active: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCluster {
    #[validate(length(min = 1, max = MAX_CLUSTER_ID_LENGTH))]
    pub id: String,

    #[validate(length(min = 1, max = MAX_ENVIRONMENT_LENGTH))]
    pub environment: String,

    #[validate(url, length(max = MAX_SERVER_URL_LENGTH))]
    pub server_url: String,

    #[validate(length(min = 1, max = MAX_CLUSTER_AUTHORITY_DATA_LENGTH))]
    #[validate(custom(function = "validate_base64"))]
    pub cluster_authority_data: String,
}

impl CreateCluster {
    /// Trims surrounding whitespace from every field.
    pub fn trimmed(self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            environment: self.environment.trim().to_string(),
            server_url: self.server_url.trim().to_string(),
            cluster_authority_data: self.cluster_authority_data.trim().to_string(),
        }
    }
}

fn validate_base64(value: &str) -> Result<(), validator::ValidationError> {
    BASE64_STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_base64"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCluster {
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListClusters {
    pub environment: Option<String>,
    #[serde(default)]
    pub active: bool,
}
