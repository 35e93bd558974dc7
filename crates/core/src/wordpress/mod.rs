//! Transformations for WordPress.com REST API data
//!
//! Response models mirror the v1.1 API shapes. Optional remote fields are
//! modeled as `Option` with serde defaults; a shape mismatch is a decode
//! error at the boundary, never a silent zero inside aggregation logic.

pub mod listing;
pub mod metrics;
pub mod post;
pub mod site;
pub mod stats;
