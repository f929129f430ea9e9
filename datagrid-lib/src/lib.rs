//! Client-side data table core
//!
//! Filtering, sorting and pagination over an in-memory dataset behind an
//! async [`QueryEngine`](engine::QueryEngine), driven by a debounced
//! [`TableController`](controller::TableController) that publishes
//! snapshots for a presentation layer to render.

pub mod controller;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
