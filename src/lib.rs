//! rxguard — drug interaction analysis engine.
//!
//! Given a set of prescribed medications and a patient snapshot, produce a
//! structured safety assessment: interactions, allergy conflicts,
//! contraindications, monitoring advice, and an aggregated risk level.
//! Reasoning is delegated to an external language model when configured;
//! any remote failure degrades to a deterministic rule-based evaluator, so
//! the engine always returns a well-formed report.
//!
//! The surrounding prescription workflow (auth, storage, UI, PDF export) is
//! out of scope; it supplies an [`models::AnalysisRequest`] and a
//! [`catalog::MedicationCatalog`] implementation and receives one
//! [`models::AnalysisReport`] per call.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod models;
