use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// Per-session access token pair returned by the login flow.
///
/// Read-only once obtained; the token secret is never logged and never
/// outlives the session that created it.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "tokenKey")]
    pub token_key: String,
    #[serde(rename = "tokenSecret")]
    token_secret: Secret<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl Credentials {
    /// Build credentials from an externally stored token pair, skipping the
    /// login flow.
    pub fn new(token_key: String, token_secret: String) -> Self {
        Self {
            token_key,
            token_secret: Secret::new(token_secret),
            user_id: None,
        }
    }

    /// Get the token secret (use carefully - exposes secret)
    pub fn token_secret(&self) -> &str {
        self.token_secret.expose_secret()
    }
}

/// Account brand an asset belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: String,
    pub tag: String,
    #[serde(rename = "mediaCount", default)]
    pub media_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single asset in the bank. Only the stable subset of fields is modeled;
/// anything else the service returns is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "brandId", default)]
    pub brand_id: Option<String>,
    #[serde(rename = "dateCreated", default)]
    pub date_created: Option<String>,
    #[serde(rename = "dateModified", default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub archive: Option<u8>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetapropertyOption {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "displayLabel", default)]
    pub display_label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metaproperty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub options: Vec<MetapropertyOption>,
    #[serde(rename = "zindex", default)]
    pub z_index: Option<i32>,
}

/// Resolved, time-limited download location for one asset.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadUrl {
    #[serde(rename = "s3_file")]
    pub s3_file: String,
}
