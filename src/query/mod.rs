//! # Listing Queries
//!
//! Filtering and pagination shared by every listing endpoint.
//!
//! A listing is a pure function of the records a backend yields and the
//! parsed request parameters: one pass applies every active predicate
//! (AND-combined), counts all matches, and keeps the ones that fall inside
//! the requested page window. Record order is whatever the backend yields.

pub mod evaluator;
pub mod filter;
pub mod params;

pub use evaluator::{evaluate, Page, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use filter::{contains_ignore_case, ArticleFilter, MatchAll, RecordFilter};
pub use params::{parse_lenient_int, ListParams};
