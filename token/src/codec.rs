// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Token wire format.
//!
//! ```text
//! pharos-v1.<base64url, no padding, of the presigned GET URL>
//! ```
//!
//! The token carries no expiry of its own: STS rejects the embedded request
//! once its `X-Amz-Date` falls outside the signature window.

use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use url::Url;

use crate::constants::TOKEN_PREFIX;
use crate::errors::TokenError;

#[inline]
pub fn encode(presigned_url: &str) -> String {
    format!(
        "{TOKEN_PREFIX}{}",
        BASE64_URL_SAFE_NO_PAD.encode(presigned_url.as_bytes())
    )
}

/// Strips the prefix, decodes the payload and parses it as an absolute URL.
pub fn decode(token: &str) -> Result<Url, TokenError> {
    let payload = token.strip_prefix(TOKEN_PREFIX).ok_or_else(|| {
        TokenError::MalformedToken(format!(
            "token is missing expected {TOKEN_PREFIX:?} prefix"
        ))
    })?;

    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| TokenError::MalformedToken(format!("failed to base64 decode token: {err}")))?;

    let raw = String::from_utf8(bytes).map_err(|err| {
        TokenError::MalformedToken(format!("failed to parse STS request URL: {err}"))
    })?;

    Url::parse(&raw)
        .map_err(|err| TokenError::MalformedToken(format!("failed to parse STS request URL: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_value() {
        assert_eq!(encode("https://localhost/"), "pharos-v1.aHR0cHM6Ly9sb2NhbGhvc3Qv");
    }

    #[test]
    fn test_decode_missing_prefix() {
        let err = decode("aHR0cHM6Ly9sb2NhbGhvc3Qv").unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));
        assert!(err.to_string().contains("missing expected"));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = decode("pharos-v1.this is not base64!").unwrap_err();
        assert!(err.to_string().contains("base64 decode"));
    }

    #[test]
    fn test_decode_rejects_padding() {
        let err = decode("pharos-v1.aHR0cHM6Ly9sb2NhbGhvc3Q=").unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));
    }

    #[test]
    fn test_decode_rejects_relative_url() {
        let err = decode(&encode("/relative/path")).unwrap_err();
        assert!(err.to_string().contains("failed to parse STS request URL"));
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let token = format!("{TOKEN_PREFIX}{}", BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe]));
        assert!(matches!(decode(&token), Err(TokenError::MalformedToken(_))));
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            region in "[a-z]{2}-[a-z]{4,9}-[1-9]",
            date in "[0-9]{8}T[0-9]{6}Z",
            signature in "[0-9a-f]{64}",
        ) {
            let presigned = format!(
                "https://sts.{region}.amazonaws.com/?Action=GetCallerIdentity&Version=2011-06-15&X-Amz-Date={date}&X-Amz-Signature={signature}"
            );
            let decoded = decode(&encode(&presigned)).unwrap();
            prop_assert_eq!(decoded.as_str(), presigned.as_str());
        }
    }
}
