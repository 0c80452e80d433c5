use crate::core::config::DamConfig;
use crate::core::errors::DamError;
use crate::core::kernel::{join_multi, RestClient};
use crate::dam::query::{
    AddMetapropertyToMediaQuery, MediaDownloadQuery, MediaInfoQuery, MediaPropertiesQuery,
    MediaQuery, MetapropertyQuery, UploadQuery,
};
use crate::dam::types::{Brand, Category, DownloadUrl, Media, Metaproperty, Tag};
use crate::dam::upload::FileUploader;
use std::collections::HashMap;
use std::sync::Arc;

const BRANDS_PATH: &str = "api/v4/brands/";
const TAGS_PATH: &str = "api/v4/tags/";
const METAPROPERTIES_PATH: &str = "api/v4/metaproperties/";

/// Asset bank operations over the signed request pipeline.
///
/// Every method is a cold future: build, sign, send, decode run only once the
/// caller awaits, and the first failing stage short-circuits the rest.
/// Concurrent calls share nothing mutable; the signer and credentials behind
/// `rest` are read-only for the session's lifetime.
pub struct AssetBankClient<R: RestClient> {
    rest: R,
    media_path: String,
    categories_path: String,
    uploader: Option<Arc<dyn FileUploader>>,
}

impl<R: RestClient> AssetBankClient<R> {
    pub fn new(rest: R, config: &DamConfig) -> Self {
        Self {
            rest,
            media_path: config.media_path.clone(),
            categories_path: config.categories_path.clone(),
            uploader: None,
        }
    }

    /// Attach the collaborator that handles file transfers.
    pub fn with_uploader(mut self, uploader: Arc<dyn FileUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// List the account's brands.
    pub async fn get_brands(&self) -> Result<Vec<Brand>, DamError> {
        self.rest.get_list(BRANDS_PATH, &[], None).await
    }

    /// List the account's tags.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, DamError> {
        self.rest.get_list(TAGS_PATH, &[], None).await
    }

    /// List the account's categories.
    pub async fn get_categories(&self) -> Result<Vec<Category>, DamError> {
        self.rest.get_list(&self.categories_path, &[], None).await
    }

    /// Fetch the metaproperty definitions, keyed by name.
    pub async fn get_metaproperties(
        &self,
        query: MetapropertyQuery,
    ) -> Result<HashMap<String, Metaproperty>, DamError> {
        let count = query.count.map(|c| c.to_string());
        let mut params = Vec::new();
        if let Some(count) = &count {
            params.push(("count", count.as_str()));
        }
        self.rest
            .get_object(METAPROPERTIES_PATH, &params, None)
            .await
    }

    /// List assets matching the query filters.
    pub async fn get_media_list(&self, query: MediaQuery) -> Result<Vec<Media>, DamError> {
        let page = query.paged()?;
        let property_option_ids = join_multi(&query.property_option_ids);
        let count = query.count.map(|c| c.to_string());

        let mut params = Vec::new();
        if let Some(media_type) = &query.media_type {
            params.push(("type", media_type.as_str()));
        }
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.as_str()));
        }
        if !query.property_option_ids.is_empty() {
            params.push(("propertyOptionId", property_option_ids.as_str()));
        }
        if let Some(count) = &count {
            params.push(("count", count.as_str()));
        }

        self.rest.get_list(&self.media_path, &params, page).await
    }

    /// Fetch one asset's full metadata.
    pub async fn get_media_info(&self, query: MediaInfoQuery) -> Result<Media, DamError> {
        query.validate()?;
        let path = format!("{}{}/", self.media_path, query.media_id);

        let versions = query.versions.map(|v| v.to_string());
        let mut params = Vec::new();
        if let Some(versions) = &versions {
            params.push(("versions", versions.as_str()));
        }

        self.rest.get_object(&path, &params, None).await
    }

    /// Resolve the download location for an asset or one of its items.
    pub async fn get_media_download_url(
        &self,
        query: MediaDownloadQuery,
    ) -> Result<DownloadUrl, DamError> {
        query.validate()?;
        let path = match &query.media_item_id {
            Some(item_id) => format!(
                "{}{}/download/{}/",
                self.media_path, query.media_id, item_id
            ),
            None => format!("{}{}/download/", self.media_path, query.media_id),
        };
        self.rest.get_object(&path, &[], None).await
    }

    /// Update an asset's mutable metadata fields. Only set fields are sent.
    pub async fn set_media_properties(
        &self,
        query: MediaPropertiesQuery,
    ) -> Result<(), DamError> {
        query.validate()?;
        let path = format!("{}{}/", self.media_path, query.media_id);

        let archive = query.archive.map(|a| a.to_string());
        let mut form = Vec::new();
        if let Some(name) = &query.name {
            form.push(("name", name.as_str()));
        }
        if let Some(description) = &query.description {
            form.push(("description", description.as_str()));
        }
        if let Some(copyright) = &query.copyright {
            form.push(("copyright", copyright.as_str()));
        }
        if let Some(archive) = &archive {
            form.push(("archive", archive.as_str()));
        }
        if let Some(date_published) = &query.date_published {
            form.push(("datePublished", date_published.as_str()));
        }

        self.rest.post_form(&path, &form).await
    }

    /// Attach metaproperty options to an asset, comma-joined under a single
    /// `metaproperty.{id}` field.
    pub async fn add_metaproperty_to_media(
        &self,
        query: AddMetapropertyToMediaQuery,
    ) -> Result<(), DamError> {
        query.validate()?;
        let path = format!("{}{}/", self.media_path, query.media_id);
        let field = format!("metaproperty.{}", query.metaproperty_id);
        let options = join_multi(&query.option_ids);

        self.rest
            .post_form(&path, &[(field.as_str(), options.as_str())])
            .await
    }

    /// Hand a file transfer to the upload collaborator, blocking until it
    /// completes or fails.
    pub fn upload_file(&self, query: &UploadQuery) -> Result<(), DamError> {
        query.validate()?;
        let uploader = self
            .uploader
            .as_ref()
            .ok_or_else(|| DamError::Upload("no upload transport configured".to_string()))?;
        uploader.upload_file(query)
    }
}
