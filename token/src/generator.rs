// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Client side of the protocol: presign `sts:GetCallerIdentity` and wrap the
//! resulting URL into a token.
//!
//! Signing itself is delegated to a [`Presigner`]. [`SigV4Presigner`] signs
//! with the ambient AWS credentials resolved by `aws-config`.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SignatureLocation, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity as SigningIdentity;
use url::Url;

use crate::codec;
use crate::constants::{
    ASSUME_ROLE_SESSION_NAME, GET_CALLER_IDENTITY_ACTION, PRESIGN_EXPIRES_IN, STS_API_VERSION,
    STS_GLOBAL_ENDPOINT, STS_GLOBAL_SIGNING_REGION, STS_SERVICE_NAME,
};
use crate::errors::TokenError;

/// Produces presigned HTTPS GET URLs for `sts:GetCallerIdentity`.
#[async_trait]
pub trait Presigner: Send + Sync {
    async fn presign_get_caller_identity(&self, expires_in: Duration)
    -> Result<String, TokenError>;
}

/// Issues tokens for the identity the [`Presigner`] signs with.
#[derive(Debug, Clone)]
pub struct Generator<P> {
    presigner: P,
}

impl<P: Presigner> Generator<P> {
    pub fn new(presigner: P) -> Self {
        Self { presigner }
    }

    /// Returns a new token. Tokens are self-expiring; callers may reuse one
    /// until the server starts rejecting it.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self) -> Result<String, TokenError> {
        let presigned = self
            .presigner
            .presign_get_caller_identity(PRESIGN_EXPIRES_IN)
            .await?;

        Ok(codec::encode(&presigned))
    }
}

/// Signs with AWS SigV4, placing the signature in the query string.
#[derive(Debug, Clone)]
pub struct SigV4Presigner {
    credentials: SharedCredentialsProvider,
    region: Option<Region>,
}

impl SigV4Presigner {
    pub fn new(credentials: SharedCredentialsProvider, region: Option<Region>) -> Self {
        Self {
            credentials,
            region,
        }
    }

    /// Resolves credentials and region from the default provider chain.
    ///
    /// # Arguments
    ///
    /// * `profile` - Named profile to load instead of the default one
    /// * `region` - Overrides the region found in the environment
    /// * `role_arn` - Role to assume with the loaded credentials before signing
    pub async fn from_env(
        profile: Option<String>,
        region: Option<String>,
        role_arn: Option<String>,
    ) -> Result<Self, TokenError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        let credentials = match role_arn {
            Some(role_arn) => {
                tracing::debug!("[token] assuming role {}", role_arn);
                let provider = aws_config::sts::AssumeRoleProvider::builder(role_arn)
                    .session_name(ASSUME_ROLE_SESSION_NAME)
                    .configure(&config)
                    .build()
                    .await;
                SharedCredentialsProvider::new(provider)
            }
            None => config.credentials_provider().ok_or_else(|| {
                TokenError::Signing("no AWS credentials provider configured".to_string())
            })?,
        };

        Ok(Self::new(credentials, config.region().cloned()))
    }
}

/// The STS endpoint and signing region for an optional configured region.
pub fn sts_endpoint(region: Option<&str>) -> (String, String) {
    match region {
        Some(region) if region.starts_with("cn-") => (
            format!("https://sts.{region}.amazonaws.com.cn/"),
            region.to_string(),
        ),
        Some(region) => (
            format!("https://sts.{region}.amazonaws.com/"),
            region.to_string(),
        ),
        None => (
            STS_GLOBAL_ENDPOINT.to_string(),
            STS_GLOBAL_SIGNING_REGION.to_string(),
        ),
    }
}

#[async_trait]
impl Presigner for SigV4Presigner {
    async fn presign_get_caller_identity(
        &self,
        expires_in: Duration,
    ) -> Result<String, TokenError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|err| TokenError::Signing(err.to_string()))?;
        let identity: SigningIdentity = credentials.into();

        let (endpoint, signing_region) = sts_endpoint(self.region.as_ref().map(|r| r.as_ref()));
        let mut url = Url::parse(&endpoint).map_err(|err| TokenError::Signing(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("Action", GET_CALLER_IDENTITY_ACTION)
            .append_pair("Version", STS_API_VERSION);

        let mut settings = SigningSettings::default();
        settings.signature_location = SignatureLocation::QueryParams;
        settings.expires_in = Some(expires_in);

        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&signing_region)
            .name(STS_SERVICE_NAME)
            .time(SystemTime::now())
            .settings(settings)
            .build()
            .map_err(|err| TokenError::Signing(err.to_string()))?
            .into();

        let signable = SignableRequest::new(
            "GET",
            url.as_str(),
            std::iter::empty(),
            SignableBody::Bytes(&[]),
        )
        .map_err(|err| TokenError::Signing(err.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|err| TokenError::Signing(err.to_string()))?
            .into_parts();

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in instructions.params() {
                pairs.append_pair(name, value);
            }
        }

        tracing::debug!("[token] presigned GetCallerIdentity for {}", signing_region);

        Ok(url.into())
    }
}
