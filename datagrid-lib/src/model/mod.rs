//! Typed models

mod column;
mod record;

pub use column::*;
pub use record::*;
