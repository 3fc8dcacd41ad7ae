//! PDF document responses.

use crate::document::domain::StoredDocument;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// How a browser should present a returned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Display in the browser.
    Inline,
    /// Save as a file.
    Attachment,
}

impl Disposition {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
        }
    }
}

/// Builds an `application/pdf` response for `document`.
///
/// The file name is omitted from `Content-Disposition` when it cannot be
/// carried in a header value.
#[must_use]
pub(crate) fn pdf_response(document: StoredDocument, disposition: Disposition) -> Response {
    let keyword = disposition.keyword();
    let file_name = document.file_name();
    let content_disposition = Some(file_name)
        .filter(|name| !name.contains('"'))
        .and_then(|name| HeaderValue::try_from(format!("{keyword}; filename=\"{name}\"")).ok())
        .unwrap_or_else(|| HeaderValue::from_static(keyword));
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        document.into_contents(),
    )
        .into_response()
}
