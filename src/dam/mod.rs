pub mod auth;
pub mod builder;
pub mod client;
pub mod query;
pub mod types;
pub mod upload;

pub use builder::{build_with_credentials, connect};
pub use client::AssetBankClient;
pub use query::{
    AddMetapropertyToMediaQuery, MediaDownloadQuery, MediaInfoQuery, MediaPropertiesQuery,
    MediaQuery, MetapropertyQuery, UploadQuery,
};
pub use types::{Brand, Category, Credentials, DownloadUrl, Media, Metaproperty, Tag};
pub use upload::FileUploader;
