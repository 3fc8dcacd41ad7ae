//! QC inspection forms recorded against machines, with generated PDF
//! reports.
//!
//! A form is persisted first; its report is rendered and stored as a
//! best-effort follow-up, so a rendering failure never loses the form.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
