// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::serve::Serve;
use pharos_token::Verifier;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::authentication::authenticate;
use crate::authorization::authorize;
use crate::clusters::Clusters;
use crate::configuration::ServerOptions;
use crate::errors::AppError;
use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub clusters: Arc<Clusters>,
}

pub struct Application {
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(
        options: ServerOptions,
        verifier: Arc<dyn Verifier>,
        clusters: Arc<Clusters>,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", options.host, options.port);
        let listener = TcpListener::bind(address).await?;
        let server = run(listener, options.clone(), verifier, clusters)?;
        let port = server.local_addr()?.port();

        tracing::info!("[api] listening at http://{}:{}", options.host, port);

        Ok(Self { server })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Builds the router with authentication and per-route authorization.
///
/// Authentication wraps every cluster route; each method then checks its own
/// permission tier, so `GET /clusters` and `POST /clusters` can require
/// different lists.
pub fn create_router(
    options: ServerOptions,
    verifier: Arc<dyn Verifier>,
    clusters: Arc<Clusters>,
) -> Router {
    let permissions = options.permissions();
    tracing::info!(
        "[api] permissions: {} admin, {} read, {} write",
        permissions.admin.as_slice().len(),
        permissions.read.as_slice().len(),
        permissions.write.as_slice().len()
    );

    let read = from_fn_with_state(permissions.read.clone(), authorize);
    let write = from_fn_with_state(permissions.write.clone(), authorize);
    let admin = from_fn_with_state(permissions.admin.clone(), authorize);

    let state = Arc::new(AppState { clusters });

    let protected = Router::new()
        .route(
            "/clusters",
            get(routes::list_clusters)
                .route_layer(read.clone())
                .merge(post(routes::create_cluster).route_layer(write)),
        )
        .route(
            "/clusters/{id}",
            get(routes::get_cluster).route_layer(read).merge(
                post(routes::update_cluster)
                    .delete(routes::delete_cluster)
                    .route_layer(admin),
            ),
        )
        .route_layer(from_fn_with_state(verifier, authenticate));

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Answers a panicking handler with a `500` instead of dropping the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("[api] handler panicked: {}", detail);

    AppError::InternalServerError.into_response()
}

#[tracing::instrument(skip_all)]
pub fn run(
    listener: TcpListener,
    options: ServerOptions,
    verifier: Arc<dyn Verifier>,
    clusters: Arc<Clusters>,
) -> Result<Serve<TcpListener, Router, Router>, std::io::Error> {
    let app = create_router(options, verifier, clusters);
    Ok(axum::serve(listener, app))
}
