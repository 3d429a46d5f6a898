//! Producer aggregation - the engine that turns songs into producer records.
//!
//! - **Domain** (`domain.rs`) - Producer records and aggregation reports
//! - **Aggregator** (`aggregator.rs`) - Batched, cache-aware credit merging
//! - **Service** (`service.rs`) - Artist search → songs → producers

pub mod aggregator;
pub mod domain;
pub mod service;

pub use aggregator::{AggregatorConfig, ProducerAggregator};
pub use domain::{AggregationFailure, AggregationReport, NotableSong, Producer};
pub use service::{ProducerSearch, SearchOutcome};
