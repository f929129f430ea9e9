//! Error types

mod query;

pub use query::*;
