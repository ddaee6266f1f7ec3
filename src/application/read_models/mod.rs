//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the analysis results for formatters.

mod conflict_report;
mod conflict_report_builder;

pub use conflict_report::{
    ConflictReport, ConflictVersionView, ConflictView, PackageUsageRow, ReportMetadata,
};
pub use conflict_report_builder::ConflictReportBuilder;
