// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Bearer token authentication.
//!
//! Extracts `Authorization: Bearer <token>`, verifies the token and stores the
//! resulting [`Identity`] in the request extensions, where
//! [`authorization`](crate::authorization) and the handlers read it back with
//! a typed lookup.
//!
//! Verification failures are logged in full but always answered with a bare
//! `401`, so clients cannot learn which check rejected their token.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use pharos_token::{Identity, TokenError, Verifier};

use crate::constants::AUTHORIZATION_SCHEME;
use crate::errors::AppError;

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) => value,
        None => return Err(AppError::MissingAuthHeader),
    };

    let value = value.to_str().map_err(|_| AppError::InvalidAuthScheme)?;
    if value.is_empty() {
        return Err(AppError::MissingAuthHeader);
    }

    value
        .strip_prefix(AUTHORIZATION_SCHEME)
        .ok_or(AppError::InvalidAuthScheme)
}

fn log_rejection(err: &TokenError) {
    if err.is_suspicious() {
        tracing::warn!("[api] rejected untrusted token: {}", err);
    } else if err.is_operational() {
        tracing::error!("[api] unable to verify token: {}", err);
    } else {
        tracing::info!("[api] token verification failed: {}", err);
    }
}

/// Middleware authenticating every request it wraps.
#[tracing::instrument(skip_all, fields(method = %request.method(), uri = %request.uri()))]
pub async fn authenticate(
    State(verifier): State<Arc<dyn Verifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())?.to_string();

    let identity: Identity = verifier.verify(&token).await.map_err(|err| {
        log_rejection(&err);
        AppError::Unauthorized
    })?;

    tracing::debug!("[api] authenticated {}", identity.canonical_arn);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
