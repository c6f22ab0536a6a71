//! Walkthrough engine: checklist generation, defect classification, and
//! report aggregation.
//!
//! Everything in this module is a pure function of its inputs (plus the
//! injected cost/risk configuration), so the route layer can call it
//! synchronously and repeatedly without coordination.

mod checklist;
mod classifier;
mod report;

pub use checklist::{generate_checklist, generate_checklist_for_year, PropertyKind, RegionTraits};
pub use classifier::{assess_status, ItemCategory, StatusAssessment};
pub use report::build_report;
