//! Multipart form helpers for upload endpoints.

use std::collections::BTreeMap;

use axum::extract::Multipart;

use crate::errors::{AppError, AppResult};

/// A file part pulled out of a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drain a multipart body into the named file part plus any text fields.
pub async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> AppResult<(Option<UploadedFile>, BTreeMap<String, String>)> {
    let mut file = None;
    let mut fields = BTreeMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::upload(format!("Failed to read file: {}", e)))?
                .to_vec();
            file = Some(UploadedFile { filename, bytes });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::bad_request(format!("Malformed form field: {}", e)))?;
            fields.insert(name, value);
        }
    }

    Ok((file, fields))
}
