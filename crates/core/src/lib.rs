//! Core library for cmstools
//!
//! This crate implements the **Functional Core** of the cmstools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The cmstools project uses a two-crate architecture to enforce separation of
//! concerns:
//!
//! - **`cmstools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`cmstools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`wordpress`]: Typed models for WordPress.com REST API responses plus the
//!   transformations built on top of them (view-count reconciliation, metrics
//!   assembly, listing aggregation, write-operation payloads)
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing API responses and outputs
//! - **Transformation functions**: Pure functions that convert API data to domain models
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use cmstools_core::wordpress::stats::{views_from_top_posts, TopPostsResponse};
//!
//! // Create fixture data (no HTTP required)
//! let top: TopPostsResponse = serde_json::from_value(fixture)?;
//!
//! // Transform using pure function
//! let views = views_from_top_posts(&top, 123, true);
//!
//! // Assert on results (no mocking needed)
//! assert_eq!(views.total_views, 50);
//! ```
//!
//! The key insight: **data transformation logic should be pure and ignorant of
//! where data comes from or where it goes**.

pub mod wordpress;
