//! Title search and fixed-size pagination for catalog lists.
//!
//! Everything here is pure: callers hand in the full collection in store
//! order and get back one page plus the totals needed to draw a pager.

use serde::Serialize;

/// Anything that can be searched by title.
pub trait Titled {
    fn title(&self) -> &str;
}

/// Why a page came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The search query matched nothing.
    NoMatches,
    /// The collection itself is empty.
    NoData,
}

impl EmptyState {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoMatches => "No dramas match your search.",
            Self::NoData => "No dramas available yet.",
        }
    }
}

/// One page of a filtered collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            empty_state: self.empty_state,
        }
    }
}

/// Case-insensitive substring match on the title. A blank query matches
/// everything.
#[must_use]
pub fn matches_query<T: Titled>(item: &T, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    item.title().to_lowercase().contains(&query.to_lowercase())
}

/// Keeps the items whose title contains `query`, preserving input order.
pub fn filter_by_title<T: Titled>(items: Vec<T>, query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| matches_query(item, query))
        .collect()
}

/// Number of pages needed for `total_count` items.
#[must_use]
pub const fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Returns the `page`-th (1-based) slice of `items`.
///
/// Page 0 is read as page 1. A page past the end yields no items.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let total_count = items.len();
    let start = (page - 1).saturating_mul(page_size);

    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_count,
        total_pages: total_pages(total_count, page_size),
        empty_state: None,
    }
}

/// Filters then paginates, classifying an empty result.
pub fn search_page<T: Titled>(items: Vec<T>, query: &str, page: usize, page_size: usize) -> Page<T> {
    let filtered = filter_by_title(items, query);
    let mut result = paginate(filtered, page, page_size);

    if result.total_count == 0 {
        result.empty_state = Some(if query.trim().is_empty() {
            EmptyState::NoData
        } else {
            EmptyState::NoMatches
        });
    }

    result
}

/// Search box and pager state for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    query: String,
    page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl ListingState {
    #[must_use]
    pub fn new(query: impl Into<String>, page: usize) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Changing the query always returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn apply<T: Titled>(&self, items: Vec<T>, page_size: usize) -> Page<T> {
        search_page(items, &self.query, self.page, page_size)
    }
}
