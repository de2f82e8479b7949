//! Signed session tokens.
//!
//! Standard JWT wire format (base64url header.claims.signature) signed with
//! HMAC-SHA256. Verification is stateless: signature, then expiry. There is
//! no server-side session store.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use nova_core::{Error, Result, User};

type HmacSha256 = Hmac<Sha256>;

const INVALID_TOKEN: &str = "Invalid or expired token";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl TokenSigner {
    /// Create a signer with the given secret and token lifetime in seconds.
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    fn mac(&self, signing_input: &str) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::Internal(format!("HMAC key setup failed: {}", e)))?;
        mac.update(signing_input.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Issue a token for a user, expiring `ttl_secs` from now.
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        self.sign(&Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        })
    }

    /// Sign explicit claims. Exposed for expiry tests.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };
        let encoded_header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
        let encoded_claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{}.{}", encoded_header, encoded_claims);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&signing_input)?);
        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let unauthorized = || Error::Unauthorized(INVALID_TOKEN.to_string());

        let mut parts = token.split('.');
        let (header_b64, claims_b64, sig_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(unauthorized()),
            };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| unauthorized())?;
        let header: Header = serde_json::from_slice(&header_bytes).map_err(|_| unauthorized())?;
        if header.alg != "HS256" {
            return Err(unauthorized());
        }

        let signature = URL_SAFE_NO_PAD.decode(sig_b64).map_err(|_| unauthorized())?;
        let signing_input = format!("{}.{}", header_b64, claims_b64);
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::Internal(format!("HMAC key setup failed: {}", e)))?;
        mac.update(signing_input.as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&signature).map_err(|_| unauthorized())?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| unauthorized())?;
        let claims: Claims = serde_json::from_slice(&claims_bytes).map_err(|_| unauthorized())?;

        if claims.exp < Utc::now().timestamp() {
            return Err(unauthorized());
        }

        Ok(claims)
    }
}
