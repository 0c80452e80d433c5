use crate::core::errors::DamError;
use crate::core::kernel::PagedQuery;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::PathBuf;

fn require(field: &str, value: &str) -> Result<(), DamError> {
    if value.trim().is_empty() {
        return Err(DamError::InvalidQuery(format!("{} is required", field)));
    }
    Ok(())
}

/// Filters for listing assets. All fields are optional; pagination rides
/// along as query parameters after the filters.
#[derive(Debug, Clone, Default)]
pub struct MediaQuery {
    pub media_type: Option<String>,
    pub keyword: Option<String>,
    pub property_option_ids: Vec<String>,
    pub count: Option<bool>,
    /// `(limit, page)`; the limit must be positive and is checked before the
    /// pipeline runs.
    pub page: Option<(u32, u32)>,
}

impl MediaQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_property_option_ids(mut self, ids: Vec<String>) -> Self {
        self.property_option_ids = ids;
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_page(mut self, limit: u32, page: u32) -> Self {
        self.page = Some((limit, page));
        self
    }

    pub(crate) fn paged(&self) -> Result<Option<PagedQuery>, DamError> {
        self.page
            .map(|(limit, page)| {
                NonZeroU32::new(limit)
                    .map(|limit| PagedQuery::new(limit, page))
                    .ok_or_else(|| DamError::InvalidQuery("limit must be positive".to_string()))
            })
            .transpose()
    }
}

#[derive(Debug, Clone)]
pub struct MediaInfoQuery {
    pub media_id: String,
    pub versions: Option<bool>,
}

impl MediaInfoQuery {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            versions: None,
        }
    }

    pub fn with_versions(mut self, versions: bool) -> Self {
        self.versions = Some(versions);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DamError> {
        require("media_id", &self.media_id)
    }
}

#[derive(Debug, Clone)]
pub struct MediaDownloadQuery {
    pub media_id: String,
    /// Specific derivative/version to download; `None` resolves the original.
    pub media_item_id: Option<String>,
}

impl MediaDownloadQuery {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            media_item_id: None,
        }
    }

    pub fn with_media_item_id(mut self, media_item_id: impl Into<String>) -> Self {
        self.media_item_id = Some(media_item_id.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DamError> {
        require("media_id", &self.media_id)
    }
}

/// Mutable asset metadata. Only the set fields are sent.
#[derive(Debug, Clone)]
pub struct MediaPropertiesQuery {
    pub media_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub copyright: Option<String>,
    pub archive: Option<bool>,
    pub date_published: Option<String>,
}

impl MediaPropertiesQuery {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            name: None,
            description: None,
            copyright: None,
            archive: None,
            date_published: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn with_date_published(mut self, date_published: impl Into<String>) -> Self {
        self.date_published = Some(date_published.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DamError> {
        require("media_id", &self.media_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetapropertyQuery {
    pub count: Option<bool>,
}

impl MetapropertyQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }
}

#[derive(Debug, Clone)]
pub struct AddMetapropertyToMediaQuery {
    pub media_id: String,
    pub metaproperty_id: String,
    pub option_ids: Vec<String>,
}

impl AddMetapropertyToMediaQuery {
    pub fn new(
        media_id: impl Into<String>,
        metaproperty_id: impl Into<String>,
        option_ids: Vec<String>,
    ) -> Self {
        Self {
            media_id: media_id.into(),
            metaproperty_id: metaproperty_id.into(),
            option_ids,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), DamError> {
        require("media_id", &self.media_id)?;
        require("metaproperty_id", &self.metaproperty_id)
    }
}

/// Parameters for the upload collaborator.
#[derive(Debug, Clone)]
pub struct UploadQuery {
    pub file_path: PathBuf,
    /// Existing asset to attach the file to as a new version; `None` creates
    /// a new asset.
    pub media_id: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl UploadQuery {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            media_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DamError> {
        if self.file_path.as_os_str().is_empty() {
            return Err(DamError::InvalidQuery("file_path is required".to_string()));
        }
        Ok(())
    }
}
