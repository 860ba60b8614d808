//! # Query Evaluator
//!
//! Produces one page of the records matching a filter, plus the total
//! match count so callers can compute the number of pages.

use serde::{Deserialize, Serialize};

use super::filter::RecordFilter;

/// Page used when none (or a non-positive one) is requested
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none (or a non-positive one) is requested
pub const DEFAULT_LIMIT: u64 = 10;

/// A 1-based page number and a page size, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Zero falls back to the default for that field.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Index of the first record on this page; saturates instead of overflowing
    pub fn offset(&self) -> usize {
        to_usize((self.page - 1).saturating_mul(self.limit))
    }

    /// Half-open index window `[start, end)` of this page
    pub fn window(&self) -> (usize, usize) {
        let start = self.offset();
        (start, start.saturating_add(to_usize(self.limit)))
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of records matching the filter, before pagination
    pub total: usize,
    pub page: u64,
    pub limit: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Convert the records of this page, keeping the counts
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            page: self.page,
            limit: self.limit,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

/// Filter and paginate `records` in a single pass.
///
/// Relative order of the input is preserved. A page past the end yields
/// no data but still reports the full `total`.
pub fn evaluate<'a, T, F, I>(records: I, filter: &F, pagination: Pagination) -> Page<T>
where
    T: Clone + 'a,
    F: RecordFilter<T> + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let (start, end) = pagination.window();
    let mut total = 0usize;
    let mut data = Vec::new();

    for record in records {
        if !filter.matches(record) {
            continue;
        }
        if total >= start && total < end {
            data.push(record.clone());
        }
        total += 1;
    }

    Page {
        total,
        page: pagination.page(),
        limit: pagination.limit(),
        data,
    }
}
