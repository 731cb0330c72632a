//! Custom extractors.

mod upload;
mod validated_json;

pub use upload::{read_multipart, UploadedFile};
pub use validated_json::ValidatedJson;
