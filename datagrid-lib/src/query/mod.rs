//! Query types shared by the engine and the controller.
//!
//! - [`Filter`] / [`Filters`] - per-column filter values
//! - [`SortSpec`] / [`Direction`] - the single honored sort key
//! - [`PageRequest`] - page index and validated page size
//! - [`Query`] - everything above, as sent to a [`QueryEngine`](crate::engine::QueryEngine)
//! - [`QueryResult`] - one page of records with the total match count

mod filter;
mod order;
mod page;
mod request;

pub use filter::Filter;
pub use filter::FilterMode;
pub use filter::Filters;
pub use order::Direction;
pub use order::SortSpec;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::PAGE_SIZES;
pub use page::PageRequest;
pub use page::QueryResult;
pub use page::page_count;
pub use request::Query;
