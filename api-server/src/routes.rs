// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! HTTP route handlers for the Pharos API.
//!
//! | Method | Path | Handler | Tier |
//! |--------|------|---------|------|
//! | GET | `/health` | [`health`] | public |
//! | GET | `/clusters` | [`list_clusters`] | read |
//! | GET | `/clusters/{id}` | [`get_cluster`] | read |
//! | POST | `/clusters` | [`create_cluster`] | write |
//! | POST | `/clusters/{id}` | [`update_cluster`] | admin |
//! | DELETE | `/clusters/{id}` | [`delete_cluster`] | admin |
//!
//! Every handler but [`health`] runs behind
//! [`authenticate`](crate::authentication::authenticate) and
//! [`authorize`](crate::authorization::authorize), so the caller's
//! [`Identity`] is always present.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::response::IntoResponse;
use pharos_token::Identity;
use serde_json::json;
use validator::Validate;

use crate::application::AppState;
use crate::errors::AppError;
use crate::models::{Cluster, CreateCluster, ListClusters, UpdateCluster};

/// Health check endpoint.
///
/// # Response
///
/// ```json
/// {"status": "ok"}
/// ```
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Lists non-deleted clusters, newest first, optionally filtered by
/// `environment` and `active`.
#[tracing::instrument(skip(state))]
pub async fn list_clusters(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListClusters>, QueryRejection>,
) -> Result<Json<Vec<Cluster>>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.clusters.list(&query).await))
}

#[tracing::instrument(skip(state))]
pub async fn get_cluster(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Cluster>, AppError> {
    Ok(Json(state.clusters.get(&id).await?))
}

/// Registers a new, inactive cluster.
///
/// # Errors
///
/// - [`AppError::ValidationError`] - Request validation failed
/// - [`AppError::ClusterExists`] - A cluster with the same id exists
#[tracing::instrument(skip(state, identity, params))]
pub async fn create_cluster(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    params: Result<Json<CreateCluster>, JsonRejection>,
) -> Result<Json<Cluster>, AppError> {
    let Json(params) = params?;
    let params = params.trimmed();
    params.validate()?;

    let cluster = state.clusters.create(params).await?;
    tracing::info!("[api] {} created cluster {}", identity.canonical_arn, cluster.id);

    Ok(Json(cluster))
}

/// Sets the `active` flag of a cluster. Activating a cluster deactivates the
/// other clusters of its environment.
#[tracing::instrument(skip(state, identity, params))]
pub async fn update_cluster(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    params: Result<Json<UpdateCluster>, JsonRejection>,
) -> Result<Json<Cluster>, AppError> {
    let Json(params) = params?;
    let cluster = state.clusters.set_active(&id, params.active).await?;
    tracing::info!(
        "[api] {} set cluster {} active={}",
        identity.canonical_arn,
        cluster.id,
        cluster.active
    );

    Ok(Json(cluster))
}

/// Soft deletes a cluster.
#[tracing::instrument(skip(state, identity))]
pub async fn delete_cluster(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Cluster>, AppError> {
    let cluster = state.clusters.delete(&id).await?;
    tracing::info!("[api] {} deleted cluster {}", identity.canonical_arn, cluster.id);

    Ok(Json(cluster))
}
