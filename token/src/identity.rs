// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use serde::Deserialize;

use crate::arn::canonicalize;
use crate::errors::TokenError;

/// The AWS principal behind a verified token.
///
/// Built fresh for every verification and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Raw ARN returned by `sts:GetCallerIdentity`.
    pub arn: String,

    /// [`arn`](Self::arn) with assumed-role sessions rewritten to their IAM
    /// role, e.g. `arn:aws:sts::ACCOUNT:assumed-role/NAME/SESSION` becomes
    /// `arn:aws:iam::ACCOUNT:role/NAME`.
    pub canonical_arn: String,

    /// The 12 digit AWS account number.
    pub account_id: String,

    /// Unique user or role id, e.g. `AROAAAAAAAAAAAAAAAAAA`.
    pub user_id: String,

    /// STS session name, empty for IAM users. For EC2 instance roles this is
    /// the instance id. Whoever may assume the role controls this value, so
    /// only trust it when that set of principals is trusted.
    pub session_name: String,
}

/// JSON envelope of a `GetCallerIdentity` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentityEnvelope {
    #[serde(rename = "GetCallerIdentityResponse")]
    pub response: CallerIdentityResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentityResponse {
    #[serde(rename = "GetCallerIdentityResult")]
    pub result: CallerIdentityResult,
    #[serde(rename = "ResponseMetadata", default)]
    pub metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentityResult {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMetadata {
    #[serde(rename = "RequestId")]
    pub request_id: String,
}

/// Splits `UserId` into the principal id and an optional session name.
///
/// STS reports `USERID` for IAM users and `USERID:SESSION` for session based
/// principals. Anything else is rejected.
pub fn split_user_id(user_id: &str) -> Result<(String, String), TokenError> {
    let parts: Vec<&str> = if user_id.is_empty() {
        Vec::new()
    } else {
        user_id.split(':').collect()
    };

    match parts.as_slice() {
        [id] => Ok((id.to_string(), String::new())),
        [id, session] => Ok((id.to_string(), session.to_string())),
        _ => Err(TokenError::MalformedResponse(format!(
            "malformed UserID {user_id:?}"
        ))),
    }
}

impl Identity {
    pub fn from_response_body(body: &[u8]) -> Result<Self, TokenError> {
        let envelope: CallerIdentityEnvelope = serde_json::from_slice(body)
            .map_err(|err| TokenError::MalformedResponse(err.to_string()))?;

        if let Some(metadata) = &envelope.response.metadata {
            tracing::debug!("[token] STS request id: {}", metadata.request_id);
        }

        Self::try_from(envelope.response.result)
    }
}

impl TryFrom<CallerIdentityResult> for Identity {
    type Error = TokenError;

    fn try_from(result: CallerIdentityResult) -> Result<Self, Self::Error> {
        let (user_id, session_name) = split_user_id(&result.user_id)?;
        let canonical_arn = canonicalize(&result.arn)?;

        Ok(Self {
            arn: result.arn,
            canonical_arn,
            account_id: result.account,
            user_id,
            session_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(arn: &str, user_id: &str) -> Vec<u8> {
        json!({
            "GetCallerIdentityResponse": {
                "GetCallerIdentityResult": {
                    "Account": "123456789012",
                    "Arn": arn,
                    "UserId": user_id
                },
                "ResponseMetadata": {"RequestId": "c6104cbe-af31-11e0-8154-cbc7ccf896c7"}
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_split_user_id() {
        assert_eq!(
            split_user_id("AIDACKCEVSQ6C2EXAMPLE").unwrap(),
            ("AIDACKCEVSQ6C2EXAMPLE".to_string(), String::new())
        );
        assert_eq!(
            split_user_id("AROAEXAMPLE:i-0123456789abcdef0").unwrap(),
            ("AROAEXAMPLE".to_string(), "i-0123456789abcdef0".to_string())
        );
    }

    #[test]
    fn test_split_user_id_rejects_other_shapes() {
        for user_id in ["", "a:b:c", "a:b:c:d"] {
            let err = split_user_id(user_id).unwrap_err();
            assert!(err.to_string().contains("malformed UserID"), "{user_id}");
        }
    }

    #[test]
    fn test_from_response_body_assumed_role() {
        let identity = Identity::from_response_body(&body(
            "arn:aws:sts::123456789012:assumed-role/Deploy/ci",
            "AROAEXAMPLE:ci",
        ))
        .unwrap();

        assert_eq!(identity.arn, "arn:aws:sts::123456789012:assumed-role/Deploy/ci");
        assert_eq!(identity.canonical_arn, "arn:aws:iam::123456789012:role/Deploy");
        assert_eq!(identity.account_id, "123456789012");
        assert_eq!(identity.user_id, "AROAEXAMPLE");
        assert_eq!(identity.session_name, "ci");
    }

    #[test]
    fn test_from_response_body_without_metadata() {
        let body = json!({
            "GetCallerIdentityResponse": {
                "GetCallerIdentityResult": {
                    "Account": "123456789012",
                    "Arn": "arn:aws:iam::123456789012:root",
                    "UserId": "123456789012"
                }
            }
        })
        .to_string();

        let identity = Identity::from_response_body(body.as_bytes()).unwrap();
        assert_eq!(identity.canonical_arn, "arn:aws:iam::123456789012:root");
    }

    #[test]
    fn test_from_response_body_rejects_garbage() {
        let err = Identity::from_response_body(b"<xml/>").unwrap_err();
        assert!(matches!(err, TokenError::MalformedResponse(_)));

        let err = Identity::from_response_body(br#"{"GetCallerIdentityResponse": {}}"#).unwrap_err();
        assert!(matches!(err, TokenError::MalformedResponse(_)));
    }

    #[test]
    fn test_from_response_body_rejects_unsupported_principal() {
        let err = Identity::from_response_body(&body("arn:aws:s3:::bucket", "Alice")).unwrap_err();
        assert!(matches!(err, TokenError::InvalidIdentity(_)));
    }
}
