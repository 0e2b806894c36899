//! Bearer credential verification
//!
//! Tokens are issued by the external identity provider and verified
//! cryptographically here - handlers only ever see a [`VerifiedClaims`]
//! value, never a raw decoded payload.
//!
//! Two modes:
//! - RS256 against the provider's published JWKS (issuer and audience
//!   validated), fetched once at startup
//! - HS256 shared secret, for development and tests

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use tunedeck_common::config::AuthConfig;
use tunedeck_common::{Error, Result};

/// Timeout for the startup JWKS fetch
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Claims extracted from a successfully verified credential
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    /// Identity provider subject - the user id everywhere in this system
    pub sub: String,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: String,
    preferred_username: Option<String>,
    email: Option<String>,
}

/// Verifies bearer tokens against a fixed key set
pub struct TokenVerifier {
    keys: Vec<(Option<String>, DecodingKey)>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("keys", &self.keys.len())
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Shared-secret verifier (HS256)
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            keys: vec![(None, DecodingKey::from_secret(secret))],
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Fetch the identity provider's JWKS and build an RS256 verifier
    pub async fn from_jwks(
        jwks_url: &str,
        issuer: &str,
        audience: Option<&str>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(JWKS_FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        let jwks: JwkSet = http
            .get(jwks_url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| Error::Config(format!("failed to fetch JWKS from {}: {}", jwks_url, e)))?
            .json()
            .await
            .map_err(|e| Error::Config(format!("invalid JWKS document: {}", e)))?;

        let mut keys = Vec::new();
        for jwk in &jwks.keys {
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => keys.push((jwk.common.key_id.clone(), key)),
                Err(e) => debug!(kid = ?jwk.common.key_id, "skipping unusable JWK: {}", e),
            }
        }
        if keys.is_empty() {
            return Err(Error::Config(format!("no usable keys in JWKS at {}", jwks_url)));
        }

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        if let Some(audience) = audience {
            validation.set_audience(&[audience]);
        }

        Ok(Self { keys, validation })
    }

    /// Build a verifier from configuration.
    ///
    /// A configured JWKS endpoint wins over a shared secret.
    pub async fn from_config(auth: &AuthConfig) -> Result<Self> {
        match (&auth.jwks_url, &auth.issuer, &auth.hs256_secret) {
            (Some(jwks_url), Some(issuer), _) => {
                Self::from_jwks(jwks_url, issuer, auth.audience.as_deref()).await
            }
            (None, None, Some(secret)) => Ok(Self::hs256(secret.as_bytes())),
            (Some(_), None, _) | (None, Some(_), _) => Err(Error::Config(
                "auth.jwks_url and auth.issuer must be set together".to_string(),
            )),
            (None, None, None) => Err(Error::Config(
                "auth requires either jwks_url + issuer or hs256_secret".to_string(),
            )),
        }
    }

    /// Verify a bearer token and extract its claims
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        let header = decode_header(token)
            .map_err(|e| Error::Unauthorized(format!("invalid token: {}", e)))?;

        // Prefer the key named by the kid header; fall back to trying all
        // keys when the kid is absent or unknown (key rollover).
        let by_kid: Vec<&DecodingKey> = match &header.kid {
            Some(kid) => self
                .keys
                .iter()
                .filter(|(id, _)| id.as_deref() == Some(kid.as_str()))
                .map(|(_, key)| key)
                .collect(),
            None => Vec::new(),
        };
        let candidates: Vec<&DecodingKey> = if by_kid.is_empty() {
            self.keys.iter().map(|(_, key)| key).collect()
        } else {
            by_kid
        };

        let mut last_err = None;
        for key in candidates {
            match decode::<RawClaims>(token, key, &self.validation) {
                Ok(data) => {
                    return Ok(VerifiedClaims {
                        sub: data.claims.sub,
                        preferred_username: data.claims.preferred_username,
                        email: data.claims.email,
                    })
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(Error::Unauthorized(match last_err {
            Some(e) => format!("invalid token: {}", e),
            None => "no verification key available".to_string(),
        }))
    }
}
