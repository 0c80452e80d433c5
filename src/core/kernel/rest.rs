use crate::core::errors::DamError;
use crate::core::kernel::codec;
use crate::core::kernel::signer::{encode_query_value, generate_nonce, unix_timestamp, Signer};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Pagination window appended after the caller-declared query parameters.
///
/// The page size is positive by construction; a zero limit is not
/// representable. Absence means the service default page size; values always
/// travel as query parameters, never as body fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedQuery {
    pub limit: NonZeroU32,
    pub page: u32,
}

impl PagedQuery {
    pub fn new(limit: NonZeroU32, page: u32) -> Self {
        Self { limit, page }
    }
}

/// Serialize a multi-valued parameter as one comma-joined value. The service
/// expects `k=a,b,c`, never repeated keys.
pub fn join_multi<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(std::convert::AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Assemble the request URL: base and path stay untouched, query values are
/// percent-encoded (commas literal), pagination comes last.
pub fn build_url(
    base_url: &str,
    path: &str,
    query: &[(&str, &str)],
    page: Option<PagedQuery>,
) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    if let Some(page) = page {
        pairs.push(("limit".to_string(), page.limit.to_string()));
        pairs.push(("page".to_string(), page.page.to_string()));
    }

    let mut url = format!("{}{}", base_url, path);
    if !pairs.is_empty() {
        let query_string = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_value(k), encode_query_value(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query_string);
    }
    url
}

/// REST client trait for the signed request pipeline
///
/// Each call runs build, sign, send, decode in order; the first failure
/// short-circuits the rest. Implementations must be safe to share across
/// concurrent calls.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET a single JSON object decoded into `T`.
    async fn get_object<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
    ) -> Result<T, DamError>;

    /// GET a JSON array decoded element-by-element into `Vec<T>`.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
    ) -> Result<Vec<T>, DamError>;

    /// POST form-encoded parameters; the response body is discarded.
    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), DamError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Service name for logging and tracing
    pub service_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, service_name: String) -> Self {
        Self {
            base_url,
            service_name,
            timeout_seconds: 30,
            user_agent: "assetbank/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer used to authenticate every request
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, DamError> {
        let signer = self.signer.ok_or_else(|| {
            DamError::Config(crate::core::config::ConfigError::InvalidConfiguration(
                "no signer configured".to_string(),
            ))
        })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| DamError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Arc<dyn Signer>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Collect every parameter that enters the signature base string.
    fn signing_params(
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
        form: &[(&str, &str)],
    ) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = query
            .iter()
            .chain(form.iter())
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        if let Some(page) = page {
            params.push(("limit".to_string(), page.limit.to_string()));
            params.push(("page".to_string(), page.page.to_string()));
        }
        params
    }

    /// Run build and sign, then send, returning the raw response body.
    #[instrument(skip(self, form), fields(service = %self.config.service_name, method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
        form: &[(&str, &str)],
    ) -> Result<String, DamError> {
        let url = build_url(&self.config.base_url, path, query, page);
        let params = Self::signing_params(query, page, form);

        let nonce = generate_nonce();
        let timestamp = unix_timestamp()?;
        let authorization =
            self.signer
                .authorization_header(method.as_str(), &url, &params, &nonce, timestamp)?;

        let mut request = self
            .client
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, authorization);
        if !form.is_empty() {
            request = request.form(form);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DamError::Network(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DamError::Network(format!("failed to read response body: {}", e)))?;

        trace!("response body: {}", body);

        if status.is_success() {
            Ok(body)
        } else {
            Err(DamError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get_object<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
    ) -> Result<T, DamError> {
        let body = self.execute(Method::GET, path, query, page, &[]).await?;
        codec::decode_object(&body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: Option<PagedQuery>,
    ) -> Result<Vec<T>, DamError> {
        let body = self.execute(Method::GET, path, query, page, &[]).await?;
        codec::decode_list(&body)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), DamError> {
        self.execute(Method::POST, path, &[], None, form).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(limit: u32, page: u32) -> PagedQuery {
        PagedQuery::new(NonZeroU32::new(limit).unwrap(), page)
    }

    #[test]
    fn builds_url_with_query_and_pagination() {
        let url = build_url(
            "https://x.example/",
            "media/",
            &[("type", "image")],
            Some(page(10, 1)),
        );
        assert_eq!(url, "https://x.example/media/?type=image&limit=10&page=1");
    }

    #[test]
    fn builds_url_without_parameters() {
        let url = build_url("https://x.example/", "brands/", &[], None);
        assert_eq!(url, "https://x.example/brands/");
    }

    #[test]
    fn preserves_caller_declared_parameter_order() {
        let url = build_url(
            "https://x.example/",
            "media/",
            &[("keyword", "logo"), ("type", "image")],
            None,
        );
        assert_eq!(url, "https://x.example/media/?keyword=logo&type=image");
    }

    #[test]
    fn multi_valued_parameter_is_comma_joined_not_repeated() {
        let joined = join_multi(&["a", "b", "c"]);
        let url = build_url(
            "https://x.example/",
            "media/",
            &[("propertyOptionId", joined.as_str())],
            None,
        );
        assert_eq!(url, "https://x.example/media/?propertyOptionId=a,b,c");
        assert_eq!(url.matches("propertyOptionId").count(), 1);
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let url = build_url(
            "https://x.example/",
            "media/",
            &[("keyword", "summer campaign")],
            None,
        );
        assert_eq!(url, "https://x.example/media/?keyword=summer%20campaign");
    }
}
