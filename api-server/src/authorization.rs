// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use pharos_token::Identity;

use crate::configuration::AllowList;
use crate::errors::AppError;

/// Admits the request iff the authenticated identity's canonical ARN is on
/// the route's allow-list. Must run after
/// [`authenticate`](crate::authentication::authenticate).
pub async fn authorize(
    State(allowed): State<AllowList>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(identity) = request.extensions().get::<Identity>() else {
        tracing::warn!("[api] no identity on request, is authentication installed?");
        return Err(AppError::Unauthorized);
    };

    if !allowed.contains(&identity.canonical_arn) {
        tracing::info!(
            "[api] {} is not allowed to {} {}",
            identity.canonical_arn,
            request.method(),
            request.uri().path()
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::middleware::{from_fn, from_fn_with_state};
    use axum::routing::get;
    use axum_test::TestServer;

    fn identity(canonical_arn: &str) -> Identity {
        Identity {
            arn: canonical_arn.to_string(),
            canonical_arn: canonical_arn.to_string(),
            account_id: "123456789012".to_string(),
            user_id: "Alice".to_string(),
            session_name: String::new(),
        }
    }

    fn server(authenticated_as: Option<&'static str>, allowed: &[&str]) -> TestServer {
        let allowed: AllowList = allowed.iter().collect();
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(allowed, authorize))
            .layer(from_fn(move |mut request: Request, next: Next| async move {
                if let Some(arn) = authenticated_as {
                    request.extensions_mut().insert(identity(arn));
                }
                next.run(request).await
            }));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_allows_listed_identity() {
        let response = server(Some("admin"), &["admin"]).get("/").await;
        response.assert_status_ok();
        response.assert_text("ok");
    }

    #[tokio::test]
    async fn test_denies_unlisted_identity() {
        let response = server(Some("admin"), &["other"]).get("/").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_denies_missing_identity() {
        let response = server(None, &["admin"]).get("/").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_matches_exactly() {
        let response = server(
            Some("arn:aws:iam::123456789012:role/Admin"),
            &["arn:aws:iam::123456789012:role/*", "arn:aws:iam::123456789012:role/admin"],
        )
        .get("/")
        .await;
        response.assert_status_unauthorized();
    }
}
