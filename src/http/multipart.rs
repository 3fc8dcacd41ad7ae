//! Buffered `multipart/form-data` parsing.

use super::error::ApiError;
use crate::document::domain::DocumentUpload;
use axum::extract::Multipart;
use std::collections::HashMap;

#[derive(Debug)]
struct Part {
    file_name: Option<String>,
    data: Vec<u8>,
}

/// All parts of a multipart request, keyed by part name.
///
/// When a name repeats, the last part wins.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    parts: HashMap<String, Part>,
}

impl MultipartForm {
    /// Reads every part of `multipart` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the body is not valid
    /// multipart data or exceeds the body limit.
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut parts = HashMap::new();
        while let Some(field) = multipart.next_field().await.map_err(invalid)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_owned);
            let data = field.bytes().await.map_err(invalid)?;
            parts.insert(
                name,
                Part {
                    file_name,
                    data: data.to_vec(),
                },
            );
        }
        Ok(Self { parts })
    }

    /// Returns a text part, or `None` when absent or not UTF-8.
    #[must_use]
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.parts
            .get(name)
            .and_then(|part| std::str::from_utf8(&part.data).ok())
    }

    /// Removes and returns a file part as an upload.
    pub(crate) fn take_file(&mut self, name: &str) -> Option<DocumentUpload> {
        self.parts
            .remove(name)
            .map(|part| DocumentUpload::new(part.file_name, part.data))
    }
}

fn invalid(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("Invalid multipart request: {}", err.body_text()))
}
