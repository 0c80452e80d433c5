use crate::core::errors::DamError;
use crate::dam::query::UploadQuery;

/// Collaborator handling the chunked file-upload protocol.
///
/// The core hands the whole transfer to this trait and blocks on the result;
/// the multipart/session protocol behind it is not part of the request
/// pipeline. Failures come back as `DamError::Upload`, `DamError::Io`, or
/// `DamError::Interrupted` and propagate unchanged.
pub trait FileUploader: Send + Sync {
    /// Upload the file described by `query`, returning once the transfer has
    /// completed or failed.
    fn upload_file(&self, query: &UploadQuery) -> Result<(), DamError>;
}
