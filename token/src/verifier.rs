// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Server side of the protocol: validate a token and replay its embedded
//! request against STS.
//!
//! # Pipeline
//!
//! 1. Strip the version prefix and decode the payload ([`codec::decode`])
//! 2. Require an `https` URL on an STS host at path `/`
//! 3. Require `Action=GetCallerIdentity` and a non-empty `X-Amz-Date`
//! 4. Replay the GET through a [`StsTransport`]
//! 5. Parse the response into an [`Identity`]
//!
//! Every stage fails closed and nothing is retried. Steps 1 to 3 run before
//! any network I/O, so a token pointing anywhere but STS never leaves the
//! process.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use reqwest::header::ACCEPT;
use url::Url;

use crate::codec;
use crate::constants::{GET_CALLER_IDENTITY_ACTION, STS_CHINA_HOST_PATTERN, STS_HOST_PATTERN};
use crate::errors::TokenError;
use crate::identity::Identity;

static STS_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STS_HOST_PATTERN).expect("valid STS host pattern"));
static STS_CHINA_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STS_CHINA_HOST_PATTERN).expect("valid STS host pattern"));

/// Validates tokens and returns the identity that signed them.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}

/// Status and body of a replayed STS request.
#[derive(Debug, Clone)]
pub struct StsResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Performs the outbound GET to STS.
#[async_trait]
pub trait StsTransport: Send + Sync {
    async fn get(&self, url: Url) -> Result<StsResponse, TokenError>;
}

/// [`StsTransport`] over `reqwest`, restricted to HTTPS without redirects.
#[derive(Debug, Clone)]
pub struct HttpsTransport {
    client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new(timeout: Duration) -> Result<Self, TokenError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .https_only(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| TokenError::Transport(err.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpsTransport {
    /// Builds the replayed GET. The URL is sent exactly as signed.
    pub fn request(&self, url: Url) -> Result<reqwest::Request, TokenError> {
        self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|err| TokenError::Transport(err.to_string()))
    }
}

#[async_trait]
impl StsTransport for HttpsTransport {
    async fn get(&self, url: Url) -> Result<StsResponse, TokenError> {
        let request = self.request(url)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| {
                TokenError::UpstreamUnavailable(format!(
                    "error performing AWS STS GET request: {err}"
                ))
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| {
            TokenError::UpstreamUnavailable(format!("error reading HTTP response: {err}"))
        })?;

        Ok(StsResponse { status, body })
    }
}

/// Which STS hostnames a token may point at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostPolicy {
    /// Also accept `*.amazonaws.com.cn` endpoints.
    pub allow_china_partition: bool,
}

impl HostPolicy {
    pub fn check(&self, url: &Url) -> Result<(), TokenError> {
        let host = url.host_str().unwrap_or_default();
        let unexpected = || {
            TokenError::UntrustedRequest(format!(
                "unexpected hostname {:?} in pre-signed URL",
                url.authority()
            ))
        };

        if url.port().is_some() {
            return Err(unexpected());
        }

        if STS_HOST.is_match(host) || (self.allow_china_partition && STS_CHINA_HOST.is_match(host))
        {
            Ok(())
        } else {
            Err(unexpected())
        }
    }
}

/// Returns the value of a query parameter matched case-insensitively, or
/// `None` when absent. A parameter given more than once is rejected.
fn query_param(url: &Url, name: &str) -> Result<Option<String>, TokenError> {
    let mut values = url
        .query_pairs()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.into_owned());

    let first = values.next();
    if values.next().is_some() {
        return Err(TokenError::UntrustedRequest(format!(
            "duplicate {name} parameter in pre-signed URL"
        )));
    }

    Ok(first)
}

/// The production [`Verifier`].
#[derive(Debug, Clone)]
pub struct TokenVerifier<T> {
    transport: T,
    hosts: HostPolicy,
}

impl TokenVerifier<HttpsTransport> {
    /// A verifier replaying over HTTPS with the given client timeout.
    pub fn https(timeout: Duration, hosts: HostPolicy) -> Result<Self, TokenError> {
        Ok(Self::new(HttpsTransport::new(timeout)?, hosts))
    }
}

impl<T: StsTransport> TokenVerifier<T> {
    pub fn new(transport: T, hosts: HostPolicy) -> Self {
        Self { transport, hosts }
    }

    /// Runs every check that does not need the network and returns the URL
    /// to replay.
    pub fn validate(&self, token: &str) -> Result<Url, TokenError> {
        let url = codec::decode(token)?;

        if url.scheme() != "https" {
            return Err(TokenError::UntrustedRequest(format!(
                "unexpected scheme {:?} in pre-signed URL",
                url.scheme()
            )));
        }

        self.hosts.check(&url)?;

        if url.path() != "/" {
            return Err(TokenError::UntrustedRequest(
                "unexpected path in pre-signed URL".to_string(),
            ));
        }

        if query_param(&url, "action")?.as_deref() != Some(GET_CALLER_IDENTITY_ACTION) {
            return Err(TokenError::UntrustedRequest(
                "unexpected action parameter in pre-signed URL".to_string(),
            ));
        }

        if query_param(&url, "x-amz-date")?.is_none_or(|date| date.is_empty()) {
            return Err(TokenError::UntrustedRequest(
                "X-Amz-Date parameter must be present in pre-signed URL".to_string(),
            ));
        }

        Ok(url)
    }
}

#[async_trait]
impl<T: StsTransport> Verifier for TokenVerifier<T> {
    #[tracing::instrument(skip_all)]
    async fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let url = self.validate(token)?;

        tracing::debug!("[token] replaying GetCallerIdentity against {:?}", url.host_str());
        let response = self.transport.get(url).await?;

        if response.status != 200 {
            return Err(TokenError::UpstreamRejected {
                status: response.status,
            });
        }

        Identity::from_response_body(&response.body)
    }
}
