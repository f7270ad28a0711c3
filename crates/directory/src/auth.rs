//! Service account authentication for Google Workspace.
//!
//! A service account with domain-wide delegation signs a JWT assertion that
//! names the admin user it impersonates, then exchanges the assertion for a
//! short-lived access token. The exchange happens lazily on the first API
//! call, and the token is reused until shortly before it expires.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use gmr_core::error::{ReportError, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// Google's OAuth2 token endpoint, used when the key file omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The JSON key file Google issues for a service account.
#[derive(Clone, Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub struct ServiceAccountKey {
    #[serde(default, rename = "type")]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

struct ServiceAccountAuth {
    http: reqwest::Client,
    client_email: String,
    key_id: Option<String>,
    encoding_key: EncodingKey,
    token_uri: String,
    subject: String,
    scopes: Vec<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.exchange().await?;
        let token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            sub: &self.subject,
            scope: self.scopes.join(" "),
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ReportError::Credentials(format!("failed to sign JWT assertion: {e}")))
    }

    async fn exchange(&self) -> Result<CachedToken> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        debug!(
            issuer = %self.client_email,
            subject = %self.subject,
            "exchanging service account assertion for access token"
        );

        let resp = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ReportError::Auth(format!("token request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Auth(format!(
                "token exchange failed ({status}): {body}"
            )));
        }

        let body = resp
            .json::<TokenResponse>()
            .await
            .map_err(|e| ReportError::Auth(format!("token response parse failed: {e}")))?;

        let lifetime = body
            .expires_in
            .unwrap_or(ASSERTION_LIFETIME_SECS)
            .clamp(0, ASSERTION_LIFETIME_SECS);
        Ok(CachedToken {
            access_token: body.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

enum TokenSource {
    Static(String),
    ServiceAccount(Box<ServiceAccountAuth>),
}

/// Supplies OAuth2 bearer tokens for Google API requests.
pub struct GoogleAuth {
    source: TokenSource,
}

impl GoogleAuth {
    /// Create an auth instance that always returns the given bearer token.
    pub fn new(token: String) -> Self {
        Self {
            source: TokenSource::Static(token),
        }
    }

    /// Load a service account key file and impersonate `subject` with `scopes`.
    pub fn from_service_account_file(path: &Path, subject: &str, scopes: &[&str]) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            ReportError::Credentials(format!("could not open {}: {e}", path.display()))
        })?;
        Self::from_service_account_reader(file, subject, scopes)
    }

    /// Read service account key JSON from `reader`.
    pub fn from_service_account_reader<R: Read>(
        mut reader: R,
        subject: &str,
        scopes: &[&str],
    ) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).map_err(|e| {
            ReportError::Credentials(format!("can't read service account key: {e}"))
        })?;

        let key: ServiceAccountKey = serde_json::from_slice(&data).map_err(|e| {
            ReportError::Credentials(format!("can't parse service account key: {e}"))
        })?;

        Self::from_service_account_key(key, subject, scopes)
    }

    /// Build from an already-parsed key. No network call is made here.
    pub fn from_service_account_key(
        key: ServiceAccountKey,
        subject: &str,
        scopes: &[&str],
    ) -> Result<Self> {
        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(ReportError::Credentials(format!(
                    "expected a service_account key, got {kind:?}"
                )));
            }
        }

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| ReportError::Credentials(format!("invalid private key: {e}")))?;

        Ok(Self {
            source: TokenSource::ServiceAccount(Box::new(ServiceAccountAuth {
                http: reqwest::Client::new(),
                client_email: key.client_email,
                key_id: key.private_key_id,
                encoding_key,
                token_uri: key.token_uri,
                subject: subject.to_string(),
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
                cached: Mutex::new(None),
            })),
        })
    }

    /// Returns a valid bearer token, exchanging the service account
    /// assertion if no unexpired token is cached.
    pub async fn token(&self) -> Result<String> {
        match &self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::ServiceAccount(sa) => sa.access_token().await,
        }
    }
}
