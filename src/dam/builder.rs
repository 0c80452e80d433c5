use crate::core::config::DamConfig;
use crate::core::errors::DamError;
use crate::core::kernel::{OAuthSigner, ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::dam::auth::authenticate;
use crate::dam::client::AssetBankClient;
use crate::dam::types::Credentials;
use std::sync::Arc;

/// Log in and build a fully authenticated client.
///
/// The login flow runs exactly once here; the resulting token pair is baked
/// into the signer and reused for every subsequent request.
pub async fn connect(
    config: DamConfig,
    username: &str,
    password: &str,
) -> Result<AssetBankClient<ReqwestRest>, DamError> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("assetbank/0.1")
        .build()
        .map_err(|e| DamError::Network(format!("failed to build HTTP client: {}", e)))?;

    let credentials = authenticate(&http, &config, username, password).await?;
    build_with_credentials(config, &credentials)
}

/// Build a client from an already obtained token pair, skipping the login
/// flow.
pub fn build_with_credentials(
    config: DamConfig,
    credentials: &Credentials,
) -> Result<AssetBankClient<ReqwestRest>, DamError> {
    let signer = Arc::new(OAuthSigner::for_session(
        &config,
        &credentials.token_key,
        credentials.token_secret(),
    ));

    let rest_config = RestClientConfig::new(config.base_url.clone(), "assetbank".to_string());
    let rest = RestClientBuilder::new(rest_config)
        .with_signer(signer)
        .build()?;

    Ok(AssetBankClient::new(rest, &config))
}
