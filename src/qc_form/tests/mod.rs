//! Unit tests for QC forms.
