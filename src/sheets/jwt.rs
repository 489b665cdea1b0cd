use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rustls::sign::{RsaSigningKey, Signer, SigningKey};
use rustls::{PrivateKey, SignatureScheme};
use serde::Serialize;

use super::SheetsError;
use crate::credentials::ServiceAccountKey;

const GOOGLE_RS256_HEAD: &str = r#"{"alg":"RS256","typ":"JWT"}"#;

/// Max validity Google accepts for an assertion is one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Encodes s as unpadded base64url
fn append_base64<T: AsRef<[u8]> + ?Sized>(s: &T, out: &mut String) {
    URL_SAFE_NO_PAD.encode_string(s, out)
}

/// Decode a PKCS8 formatted RSA key.
fn decode_rsa_key(pem_pkcs8: &str) -> Result<PrivateKey, SheetsError> {
    let mut private_keys = rustls_pemfile::pkcs8_private_keys(&mut pem_pkcs8.as_bytes())
        .map_err(|e| SheetsError::Signing(format!("unreadable private key PEM: {e}")))?;
    if private_keys.is_empty() {
        return Err(SheetsError::Signing(
            "no PKCS#8 private key found in PEM".to_string(),
        ));
    }
    Ok(PrivateKey(private_keys.remove(0)))
}

/// Claims of the JWT-bearer assertion.
/// See https://developers.google.com/identity/protocols/oauth2/service-account#authorizingrequests.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub(crate) struct Claims<'a> {
    iss: &'a str,
    aud: &'a str,
    scope: String,
    iat: i64,
    exp: i64,
}

impl<'a> Claims<'a> {
    pub(crate) fn new(key: &'a ServiceAccountKey, scopes: &[&str]) -> Self {
        Self::issued_at(key, scopes, Utc::now().timestamp())
    }

    pub(crate) fn issued_at(key: &'a ServiceAccountKey, scopes: &[&str], iat: i64) -> Self {
        Claims {
            iss: &key.client_email,
            aud: &key.token_uri,
            scope: scopes.join(" "),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// RS256 signer built from the service account's private key.
pub(crate) struct JwtSigner {
    signer: Box<dyn Signer>,
}

impl JwtSigner {
    pub(crate) fn new(private_key: &str) -> Result<Self, SheetsError> {
        let key = decode_rsa_key(private_key)?;
        let signing_key = RsaSigningKey::new(&key)
            .map_err(|_| SheetsError::Signing("private key is not a usable RSA key".to_string()))?;
        let signer = signing_key
            .choose_scheme(&[SignatureScheme::RSA_PKCS1_SHA256])
            .ok_or_else(|| SheetsError::Signing("RS256 signing scheme unavailable".to_string()))?;
        Ok(JwtSigner { signer })
    }

    pub(crate) fn sign_claims(&self, claims: &Claims) -> Result<String, SheetsError> {
        let mut jwt_head = Self::encode_claims(claims)?;
        let signature = self
            .signer
            .sign(jwt_head.as_bytes())
            .map_err(|e| SheetsError::Signing(e.to_string()))?;
        jwt_head.push('.');
        append_base64(&signature, &mut jwt_head);
        Ok(jwt_head)
    }

    /// Encodes the header and claims and joins them into the signing input.
    fn encode_claims(claims: &Claims) -> Result<String, SheetsError> {
        let claims_json =
            serde_json::to_string(claims).map_err(|e| SheetsError::Signing(e.to_string()))?;
        let mut head = String::new();
        append_base64(GOOGLE_RS256_HEAD, &mut head);
        head.push('.');
        append_base64(&claims_json, &mut head);
        Ok(head)
    }
}
