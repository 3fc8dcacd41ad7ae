//! Document kinds and their storage conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a stored PDF document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Master card data sheet attached to a machine.
    MasterCard,
    /// Electrical wiring drawing attached to a machine.
    ElectricDrawing,
    /// Rendered quality-control inspection report.
    QcReport,
}

impl DocumentKind {
    /// Returns the tag embedded in stored file names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::MasterCard => "mastercard",
            Self::ElectricDrawing => "drawing",
            Self::QcReport => "qcform",
        }
    }

    /// Returns the subdirectory of the upload root holding this kind.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::MasterCard => "mastercards",
            Self::ElectricDrawing => "drawings",
            Self::QcReport => "qcforms",
        }
    }

    /// Returns the human-readable label used in response messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MasterCard => "master card",
            Self::ElectricDrawing => "drawing",
            Self::QcReport => "QC report",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
