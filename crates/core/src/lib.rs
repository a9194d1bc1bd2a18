//! Core business logic for Splitter.
//!
//! This crate contains the split engine with ZERO web dependencies:
//! share calculation for every strategy, the concurrent split store and the
//! service that ties them together.
//!
//! # Modules
//!
//! - `split` - Share calculation, storage and settlement of splits

pub mod split;

pub use split::{SplitError, SplitService};
