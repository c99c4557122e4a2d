// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! In-process registry of cluster records.
//!
//! Records are never removed: deleting a cluster flags it as deleted, and
//! activating a cluster deactivates every other cluster in its environment.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{Cluster, CreateCluster, ListClusters};

#[derive(Debug, Default)]
pub struct Clusters {
    clusters: RwLock<Vec<Cluster>>,
}

impl Clusters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-deleted clusters, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &ListClusters) -> Vec<Cluster> {
        let clusters = self.clusters.read().await;
        let mut matching: Vec<Cluster> = clusters
            .iter()
            .filter(|cluster| !cluster.deleted)
            .filter(|cluster| {
                query
                    .environment
                    .as_deref()
                    .is_none_or(|environment| environment.is_empty() || cluster.environment == environment)
            })
            .filter(|cluster| !query.active || cluster.active)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        matching
    }

    /// Looks a cluster up by id, including deleted ones.
    pub async fn get(&self, id: &str) -> Result<Cluster, AppError> {
        let clusters = self.clusters.read().await;
        clusters
            .iter()
            .find(|cluster| cluster.id == id)
            .cloned()
            .ok_or(AppError::ClusterNotFound)
    }

    #[tracing::instrument(skip(self, params), fields(id = %params.id))]
    pub async fn create(&self, params: CreateCluster) -> Result<Cluster, AppError> {
        let mut clusters = self.clusters.write().await;
        if clusters.iter().any(|cluster| cluster.id == params.id) {
            return Err(AppError::ClusterExists);
        }

        let now = Utc::now();
        let cluster = Cluster {
            id: params.id,
            environment: params.environment,
            server_url: params.server_url,
            cluster_authority_data: params.cluster_authority_data,
            deleted: false,
            active: false,
            date_created: now,
            date_modified: now,
        };
        clusters.push(cluster.clone());

        Ok(cluster)
    }

    /// Sets the active flag of a non-deleted cluster. Activating one clears
    /// the flag on every other cluster of the same environment.
    #[tracing::instrument(skip(self))]
    pub async fn set_active(&self, id: &str, active: bool) -> Result<Cluster, AppError> {
        let mut clusters = self.clusters.write().await;
        let environment = clusters
            .iter()
            .find(|cluster| cluster.id == id && !cluster.deleted)
            .map(|cluster| cluster.environment.clone())
            .ok_or(AppError::ClusterNotFound)?;

        let now = Utc::now();
        let mut updated = None;
        for cluster in clusters.iter_mut() {
            if cluster.id == id {
                cluster.active = active;
                cluster.date_modified = now;
                updated = Some(cluster.clone());
            } else if active && cluster.environment == environment && cluster.active {
                cluster.active = false;
                cluster.date_modified = now;
            }
        }

        updated.ok_or(AppError::ClusterNotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Cluster, AppError> {
        let mut clusters = self.clusters.write().await;
        let cluster = clusters
            .iter_mut()
            .find(|cluster| cluster.id == id)
            .ok_or(AppError::ClusterNotFound)?;

        cluster.deleted = true;
        cluster.date_modified = Utc::now();

        Ok(cluster.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(id: &str, environment: &str) -> CreateCluster {
        CreateCluster {
            id: id.to_string(),
            environment: environment.to_string(),
            server_url: format!("https://{id}.example.com"),
            cluster_authority_data: "Y2VydGlmaWNhdGU=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_ids() {
        let clusters = Clusters::new();
        clusters.create(params("production-1", "production")).await.unwrap();
        let err = clusters.create(params("production-1", "production")).await.unwrap_err();
        assert_eq!(err, AppError::ClusterExists);
    }

    #[tokio::test]
    async fn test_activation_is_exclusive_per_environment() {
        let clusters = Clusters::new();
        clusters.create(params("production-1", "production")).await.unwrap();
        clusters.create(params("production-2", "production")).await.unwrap();
        clusters.create(params("sandbox-1", "sandbox")).await.unwrap();

        clusters.set_active("production-1", true).await.unwrap();
        clusters.set_active("sandbox-1", true).await.unwrap();
        clusters.set_active("production-2", true).await.unwrap();

        assert!(!clusters.get("production-1").await.unwrap().active);
        assert!(clusters.get("production-2").await.unwrap().active);
        assert!(clusters.get("sandbox-1").await.unwrap().active);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let clusters = Clusters::new();
        clusters.create(params("production-1", "production")).await.unwrap();
        clusters.create(params("production-2", "production")).await.unwrap();
        clusters.create(params("sandbox-1", "sandbox")).await.unwrap();
        clusters.set_active("production-2", true).await.unwrap();
        clusters.delete("sandbox-1").await.unwrap();

        let all = clusters.list(&ListClusters::default()).await;
        assert_eq!(all.len(), 2);

        let production = clusters
            .list(&ListClusters {
                environment: Some("production".to_string()),
                active: true,
            })
            .await;
        assert_eq!(production.len(), 1);
        assert_eq!(production[0].id, "production-2");

        let sandbox = clusters
            .list(&ListClusters {
                environment: Some("sandbox".to_string()),
                active: false,
            })
            .await;
        assert!(sandbox.is_empty());
    }

    #[tokio::test]
    async fn test_deleted_clusters_cannot_be_activated() {
        let clusters = Clusters::new();
        clusters.create(params("production-1", "production")).await.unwrap();
        let deleted = clusters.delete("production-1").await.unwrap();
        assert!(deleted.deleted);

        let err = clusters.set_active("production-1", true).await.unwrap_err();
        assert_eq!(err, AppError::ClusterNotFound);
        assert!(clusters.get("production-1").await.unwrap().deleted);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let clusters = Clusters::new();
        assert_eq!(clusters.get("nope").await.unwrap_err(), AppError::ClusterNotFound);
        assert_eq!(clusters.delete("nope").await.unwrap_err(), AppError::ClusterNotFound);
    }
}
