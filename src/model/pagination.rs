use std::collections::HashSet;

use crate::core::Keyed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationKind {
    /// No listing is active.
    #[default]
    None,
    /// The whole result set is held in memory and sliced locally.
    ClientPaged,
}

/// Page bookkeeping over the fetched superset of the active listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<T> {
    pub kind: PaginationKind,
    pub current_page: usize,
    pub page_size: usize,
    /// Size of the effective source, `-1` until a fetch has landed.
    pub total_items: i64,
    pub has_more_pages: bool,
    pub all_items: Vec<T>,
}

impl<T: Keyed + Clone> Pagination<T> {
    /// The empty state used whenever no listing is on screen.
    pub fn reset(page_size: usize) -> Self {
        Self {
            kind: PaginationKind::None,
            current_page: 1,
            page_size: page_size.max(1),
            total_items: -1,
            has_more_pages: false,
            all_items: Vec::new(),
        }
    }

    /// Builds page one from a freshly fetched result set. Later duplicates of a key are dropped.
    pub fn from_fetch(items: Vec<T>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let mut seen = HashSet::new();
        let mut all_items: Vec<T> = items
            .into_iter()
            .filter(|item| seen.insert(item.key()))
            .collect();

        // stable: equal names keep fetch order
        all_items.sort_by_key(|item| item.sort_key());

        Self {
            kind: PaginationKind::ClientPaged,
            current_page: 1,
            page_size,
            total_items: all_items.len() as i64,
            has_more_pages: all_items.len() > page_size,
            all_items,
        }
    }

    pub fn page_slice<'a>(&self, page: usize, source: &'a [T]) -> &'a [T] {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.page_size);
        if start >= source.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(source.len());
        &source[start..end]
    }

    pub fn has_more_after(&self, page: usize, source_len: usize) -> bool {
        page.max(1).saturating_mul(self.page_size) < source_len
    }

    /// Moves to the next page when one exists, otherwise returns the state untouched.
    pub fn advance(self, source: &[T]) -> Self {
        if !self.has_more_pages {
            return self;
        }

        let current_page = self.current_page + 1;
        Self {
            has_more_pages: self.has_more_after(current_page, source.len()),
            current_page,
            ..self
        }
    }

    /// Moves to the previous page. The page just left is always ahead of us.
    pub fn retreat(self) -> Self {
        if self.current_page <= 1 {
            return self;
        }

        Self {
            current_page: self.current_page - 1,
            has_more_pages: true,
            ..self
        }
    }

    /// Points back at page one of `source` and recounts it.
    pub fn rewind(self, source: &[T]) -> Self {
        Self {
            current_page: 1,
            total_items: source.len() as i64,
            has_more_pages: self.has_more_after(1, source.len()),
            ..self
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.total_items <= 0 {
            return 1;
        }
        (self.total_items as usize).div_ceil(self.page_size)
    }
}
