//! Printable view of a QC form.

use super::{QcForm, QcFormId};
use serde::Serialize;

/// Title printed at the top of every QC report.
pub const REPORT_TITLE: &str = "QC Inspection Report";

/// One labelled line of a QC report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportField {
    label: &'static str,
    value: String,
}

impl ReportField {
    /// Returns the field label, e.g. `Inspector Name`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the field value; absent values are empty.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Labelled text fields of a QC form, in print order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QcReport {
    form_id: QcFormId,
    title: &'static str,
    fields: Vec<ReportField>,
}

impl QcReport {
    /// Builds the report for `form`.
    #[must_use]
    pub fn for_form(form: &QcForm) -> Self {
        let inspection = form.inspection();
        let field = |label, value: Option<&String>| ReportField {
            label,
            value: value.cloned().unwrap_or_default(),
        };
        Self {
            form_id: form.id(),
            title: REPORT_TITLE,
            fields: vec![
                ReportField {
                    label: "QC Form ID",
                    value: form.id().to_string(),
                },
                ReportField {
                    label: "Machine ID",
                    value: form.machine_id().to_string(),
                },
                field("Inspector Name", inspection.inspector_name.as_ref()),
                field("Status", inspection.status.as_ref()),
                field("Remarks", inspection.remarks.as_ref()),
            ],
        }
    }

    /// Returns the identifier of the reported form.
    #[must_use]
    pub const fn form_id(&self) -> QcFormId {
        self.form_id
    }

    /// Returns the report title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the labelled fields in print order.
    #[must_use]
    pub fn fields(&self) -> &[ReportField] {
        &self.fields
    }

    /// Returns the original file name used when storing the report.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("qcform-{}.pdf", self.form_id)
    }
}
