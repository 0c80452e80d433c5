use crate::core::config::DamConfig;
use crate::core::errors::DamError;
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, Secret};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal; everything else is encoded.
/// The upstream service rejects signatures built with any looser set.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Same set, except the comma stays literal. Used for wire URLs so that
/// multi-valued parameters read as `k=a,b,c` the way the service expects.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',');

/// Percent-encode a string with the strict signing character set.
pub fn percent_encode(src: &str) -> String {
    utf8_percent_encode(src, OAUTH_ENCODE_SET).to_string()
}

/// Percent-encode a query value for the request URL, leaving commas literal.
pub fn encode_query_value(src: &str) -> String {
    utf8_percent_encode(src, QUERY_VALUE_ENCODE_SET).to_string()
}

/// Generate a random per-request nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Current epoch time in whole seconds.
pub fn unix_timestamp() -> Result<u64, DamError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DamError::Signing(format!("system clock before epoch: {}", e)))
}

/// Signer trait for request authentication
///
/// Produces the `Authorization` header value binding a request to the
/// session credentials. Nonce and timestamp are supplied by the caller so
/// that signing stays a pure, reproducible transform.
pub trait Signer: Send + Sync {
    /// Sign a request and return the `Authorization` header value.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, ...)
    /// * `url` - Full request URL; any query part is stripped for the base string
    /// * `params` - All query and form parameters, unencoded
    /// * `nonce` - Unique per-request value
    /// * `timestamp` - Epoch seconds
    fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, DamError>;
}

/// OAuth 1.0a HMAC-SHA1 signer.
///
/// Holds the consumer credential pair and, once the login flow has run, the
/// per-session access token pair. Immutable after construction; shared
/// read-only across in-flight calls.
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: Secret<String>,
    access_token: Option<String>,
    access_token_secret: Option<Secret<String>>,
}

impl OAuthSigner {
    /// Create a signer for an authenticated session.
    pub fn for_session(config: &DamConfig, token: &str, token_secret: &str) -> Self {
        Self {
            consumer_key: config.consumer_key().to_string(),
            consumer_secret: Secret::new(config.consumer_secret().to_string()),
            access_token: Some(token.to_string()),
            access_token_secret: Some(Secret::new(token_secret.to_string())),
        }
    }

    /// Create a token-less signer for the login request, before any access
    /// token exists.
    pub fn for_login(config: &DamConfig) -> Self {
        Self {
            consumer_key: config.consumer_key().to_string(),
            consumer_secret: Secret::new(config.consumer_secret().to_string()),
            access_token: None,
            access_token_secret: None,
        }
    }

    /// The OAuth protocol parameters for one request, unencoded.
    fn protocol_params(&self, nonce: &str, timestamp: u64) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            (
                "oauth_signature_method".to_string(),
                "HMAC-SHA1".to_string(),
            ),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        if let Some(token) = &self.access_token {
            params.push(("oauth_token".to_string(), token.clone()));
        }
        params
    }

    /// Strip query and fragment; the base string covers scheme://host/path only.
    fn signature_base_url(url: &str) -> Result<&str, DamError> {
        let trimmed = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url);
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(DamError::Signing(format!("malformed request URL: {}", url)));
        }
        Ok(trimmed)
    }

    /// Build the canonical signature base string: method, base URL, and the
    /// sorted percent-encoded parameter set, joined with `&`.
    pub fn signature_base_string(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, DamError> {
        let base_url = Self::signature_base_url(url)?;

        let mut encoded: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .chain(
                self.protocol_params(nonce, timestamp)
                    .iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(v))),
            )
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(base_url),
            percent_encode(&param_string)
        ))
    }

    fn signing_key(&self) -> String {
        let token_secret = self
            .access_token_secret
            .as_ref()
            .map_or("", |s| s.expose_secret().as_str());
        format!(
            "{}&{}",
            percent_encode(self.consumer_secret.expose_secret()),
            percent_encode(token_secret)
        )
    }

    fn compute_signature(&self, base_string: &str) -> Result<String, DamError> {
        let key = self.signing_key();
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| DamError::Signing(format!("invalid signing key: {}", e)))?;
        mac.update(base_string.as_bytes());
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl Signer for OAuthSigner {
    fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, DamError> {
        let base_string = self.signature_base_string(method, url, params, nonce, timestamp)?;
        let signature = self.compute_signature(&base_string)?;

        let mut header_params = self.protocol_params(nonce, timestamp);
        header_params.push(("oauth_signature".to_string(), signature));
        header_params.sort();

        let joined = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DamConfig {
        DamConfig::new(
            "https://x.example/".to_string(),
            "ckey".to_string(),
            "csecret".to_string(),
        )
    }

    fn query_params() -> Vec<(String, String)> {
        vec![
            ("type".to_string(), "image".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("page".to_string(), "1".to_string()),
        ]
    }

    #[test]
    fn percent_encoding_is_strict_rfc3986() {
        assert_eq!(percent_encode("abc-._~XYZ09"), "abc-._~XYZ09");
        assert_eq!(percent_encode("a b&c=d,e"), "a%20b%26c%3Dd%2Ce");
        assert_eq!(percent_encode("https://x.example/"), "https%3A%2F%2Fx.example%2F");
    }

    #[test]
    fn query_value_encoding_keeps_commas() {
        assert_eq!(encode_query_value("a,b,c"), "a,b,c");
        assert_eq!(encode_query_value("a b"), "a%20b");
    }

    #[test]
    fn base_string_sorts_and_encodes_parameters() {
        let signer = OAuthSigner::for_login(&test_config());
        let base = signer
            .signature_base_string("GET", "https://x.example/media/", &query_params(), "N1", 1000)
            .unwrap();

        assert_eq!(
            base,
            "GET&https%3A%2F%2Fx.example%2Fmedia%2F&\
             limit%3D10%26\
             oauth_consumer_key%3Dckey%26\
             oauth_nonce%3DN1%26\
             oauth_signature_method%3DHMAC-SHA1%26\
             oauth_timestamp%3D1000%26\
             oauth_version%3D1.0%26\
             page%3D1%26\
             type%3Dimage"
        );
    }

    #[test]
    fn base_string_strips_query_from_url() {
        let signer = OAuthSigner::for_login(&test_config());
        let with_query = signer
            .signature_base_string(
                "GET",
                "https://x.example/media/?type=image",
                &query_params(),
                "N1",
                1000,
            )
            .unwrap();
        let without = signer
            .signature_base_string("GET", "https://x.example/media/", &query_params(), "N1", 1000)
            .unwrap();
        assert_eq!(with_query, without);
    }

    #[test]
    fn header_is_deterministic_for_fixed_nonce_and_timestamp() {
        let config = test_config();
        let signer = OAuthSigner::for_session(&config, "tkey", "tsecret");

        let first = signer
            .authorization_header("GET", "https://x.example/media/", &query_params(), "N1", 1000)
            .unwrap();
        let second = signer
            .authorization_header("GET", "https://x.example/media/", &query_params(), "N1", 1000)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn header_lists_protocol_params_and_signature() {
        let config = test_config();
        let signer = OAuthSigner::for_session(&config, "tkey", "tsecret");

        let header = signer
            .authorization_header("GET", "https://x.example/media/", &[], "N1", 1000)
            .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"ckey\""));
        assert!(header.contains("oauth_nonce=\"N1\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1000\""));
        assert!(header.contains("oauth_token=\"tkey\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn tokenless_signer_omits_oauth_token() {
        let signer = OAuthSigner::for_login(&test_config());
        let header = signer
            .authorization_header("POST", "https://x.example/login/", &[], "N1", 1000)
            .unwrap();
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn different_nonce_changes_signature() {
        let signer = OAuthSigner::for_login(&test_config());
        let first = signer
            .authorization_header("GET", "https://x.example/media/", &[], "N1", 1000)
            .unwrap();
        let second = signer
            .authorization_header("GET", "https://x.example/media/", &[], "N2", 1000)
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_url_is_a_signing_failure() {
        let signer = OAuthSigner::for_login(&test_config());
        let err = signer
            .authorization_header("GET", "not-a-url", &[], "N1", 1000)
            .unwrap_err();
        assert!(matches!(err, DamError::Signing(_)));
    }

    #[test]
    fn nonces_are_unique_per_request() {
        let a = generate_nonce();
        let b = generate_nonce();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
    }
}
