use crate::core::Searchable;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
    pub is_active: bool,
    pub query: String,
    pub filtered_items: Vec<T>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            is_active: false,
            query: String::new(),
            filtered_items: Vec::new(),
        }
    }
}

impl<T: Searchable + Clone> SearchState<T> {
    pub fn activate() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    pub fn deactivate() -> Self {
        Self::default()
    }

    /// Replaces the query and refilters `all_items`. An empty query filters nothing.
    pub fn with_query(self, query: impl Into<String>, all_items: &[T]) -> Self {
        let query = query.into();
        let filtered_items = if query.is_empty() {
            Vec::new()
        } else {
            filter_items_by_query(all_items, &query)
        };

        Self {
            query,
            filtered_items,
            ..self
        }
    }

    /// The items pagination should slice: the filtered subset while a query is set.
    pub fn source<'a>(&'a self, all_items: &'a [T]) -> &'a [T] {
        if self.is_active && !self.query.is_empty() {
            &self.filtered_items
        } else {
            all_items
        }
    }
}

/// Case-insensitive substring match against each item's composed search text.
pub fn filter_items_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }

    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.search_text().contains(&query))
        .cloned()
        .collect()
}
