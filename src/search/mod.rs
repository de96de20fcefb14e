//! Search orchestration module
//!
//! Query models and the executor that hands a query to one provider.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
