/// Transport kernel - the authenticated request pipeline
///
/// Every operation exposed by the SDK runs through this module: the request
/// builder assembles the URL and query string, the signer binds the request
/// to the session credentials with an OAuth 1.0a `Authorization` header, the
/// reqwest transport sends it, and the codec decodes the JSON body into a
/// typed result. The kernel contains no endpoint-specific logic.
///
/// Signing, URL building, and decoding are pure synchronous transforms; the
/// transport send is the only suspension point. Each operation is a cold
/// future: nothing happens until it is awaited, and dropping it before the
/// transport completes cancels the call without touching shared state.
///
/// ```rust,no_run
/// use assetbank::core::kernel::{OAuthSigner, RestClient, RestClientBuilder, RestClientConfig};
/// use assetbank::DamConfig;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DamConfig::new(
///     "https://portal.example/".to_string(),
///     "consumer_key".to_string(),
///     "consumer_secret".to_string(),
/// );
/// let signer = Arc::new(OAuthSigner::for_session(&config, "token", "token_secret"));
///
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     config.base_url.clone(),
///     "assetbank".to_string(),
/// ))
/// .with_signer(signer)
/// .build()?;
///
/// let brands: Vec<serde_json::Value> = rest.get_list("api/v4/brands/", &[], None).await?;
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{
    build_url, join_multi, PagedQuery, ReqwestRest, RestClient, RestClientBuilder,
    RestClientConfig,
};
pub use signer::{OAuthSigner, Signer};
