//! Diesel schema for QC form persistence.

diesel::table! {
    /// QC inspection forms. `machine_id` is not a foreign key.
    qc_forms (id) {
        /// Form identifier.
        id -> Uuid,
        /// Referenced machine identifier.
        machine_id -> Uuid,
        /// Inspector name.
        inspector_name -> Nullable<Text>,
        /// Inspection outcome label.
        status -> Nullable<Text>,
        /// Free-text remarks.
        remarks -> Nullable<Text>,
        /// Path of the generated report.
        pdf_path -> Nullable<Text>,
    }
}
