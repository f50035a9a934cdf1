//! Typed list/count options, resolved by the statement builder.

use crate::sql::Predicate;

/// Options for [`crate::RecordStore::list`]. Unset values fall back to the builder defaults
/// (30 per page, page 1, all columns, no filter, no ordering).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Page size; `-1` disables paging.
    pub count: Option<i64>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Comma-separated field keys.
    pub select: Option<String>,
    pub filter: Option<Predicate>,
    /// Comma-separated field keys, `-` prefix for descending.
    pub sort: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        QueryOptions::default()
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn filter(mut self, filter: Predicate) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}
