use crate::core::config::DamConfig;
use crate::core::errors::DamError;
use crate::core::kernel::codec;
use crate::core::kernel::signer::{generate_nonce, unix_timestamp, OAuthSigner, Signer};
use crate::dam::types::Credentials;
use reqwest::Client;
use tracing::instrument;

/// Form parameters for the login request, placeholder pair first.
///
/// The service requires the consumer key/secret pair inside the signature
/// base string but rejects the login if the pair is also present in the
/// transmitted body. The pair therefore sits at index 0 so the caller can
/// sign with it and then strip it before sending.
fn login_form_params(
    config: &DamConfig,
    username: &str,
    password: &str,
) -> Vec<(String, String)> {
    vec![
        (
            config.consumer_key().to_string(),
            config.consumer_secret().to_string(),
        ),
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ]
}

/// Exchange a username/password for the per-session access token pair.
///
/// Runs once per session; the returned credentials are cached by the builder
/// and reused to sign every subsequent request. Any non-200 status is an
/// authentication failure carrying that status; the response body is never
/// logged since it holds the token secret.
#[instrument(skip(http, config, username, password))]
pub async fn authenticate(
    http: &Client,
    config: &DamConfig,
    username: &str,
    password: &str,
) -> Result<Credentials, DamError> {
    let url = format!("{}{}", config.base_url, config.login_path);

    let mut params = login_form_params(config, username, password);
    let signer = OAuthSigner::for_login(config);
    let nonce = generate_nonce();
    let timestamp = unix_timestamp()?;
    let authorization = signer.authorization_header("POST", &url, &params, &nonce, timestamp)?;

    // The placeholder pair entered the base string above; it must not reach
    // the wire or the service rejects the signature.
    params.remove(0);

    let response = http
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, authorization)
        .form(&params)
        .send()
        .await
        .map_err(|e| DamError::Network(format!("login request failed: {}", e)))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(DamError::Authentication { status });
    }

    let body = response
        .text()
        .await
        .map_err(|e| DamError::Network(format!("failed to read login response: {}", e)))?;

    codec::decode_object(&body)
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

    #[test]
    fn placeholder_pair_leads_the_login_params() {
        let params = login_form_params(&test_config(), "user", "pass");
        assert_eq!(params[0], ("ckey".to_string(), "csecret".to_string()));
        assert_eq!(params[1].0, "username");
        assert_eq!(params[2].0, "password");
    }

    #[test]
    fn placeholder_pair_enters_the_signature_base_string() {
        let config = test_config();
        let params = login_form_params(&config, "user", "pass");
        let signer = OAuthSigner::for_login(&config);

        let base = signer
            .signature_base_string("POST", "https://x.example/api/v4/users/login/", &params, "N1", 1000)
            .unwrap();

        // ckey=csecret, percent-encoded inside the base string
        assert!(base.contains("ckey%3Dcsecret"));
    }

    #[test]
    fn stripped_wire_params_carry_no_consumer_secret() {
        let config = test_config();
        let mut params = login_form_params(&config, "user", "pass");
        params.remove(0);

        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(k, v)| k != "ckey" && v != "csecret"));
    }

    #[test]
    fn credentials_parse_from_login_body() {
        let body = r#"{"tokenKey": "tk", "tokenSecret": "ts", "userId": "u1", "extra": 1}"#;
        let credentials: Credentials = codec::decode_object(body).unwrap();
        assert_eq!(credentials.token_key, "tk");
        assert_eq!(credentials.token_secret(), "ts");
        assert_eq!(credentials.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn login_body_missing_token_is_a_decode_failure() {
        let body = r#"{"userId": "u1"}"#;
        let err = codec::decode_object::<Credentials>(body).unwrap_err();
        assert!(matches!(err, DamError::Decode(_)));
    }
}
