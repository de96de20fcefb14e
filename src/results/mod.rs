//! Result types for search responses
//!
//! Construction sites enforce the response invariants: absolute URLs only,
//! `number_of_results == results.len() <= max_results`.

mod types;

pub use types::*;
