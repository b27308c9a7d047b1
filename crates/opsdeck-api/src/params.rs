// List query parameters and the paged result envelope.
//
// Uniform across every collection: page/perPage/sort/filter/expand in,
// `{ page, perPage, totalItems, totalPages, items }` out.

use serde::Deserialize;

/// Default page size for list calls.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Default sort expression: newest first.
pub const DEFAULT_SORT: &str = "-created";

/// Query parameters for a collection `list` call.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u32,
    pub per_page: u32,
    /// Sort expression, e.g. `-created` (newest first).
    pub sort: String,
    /// Filter expression evaluated server-side; empty = all records.
    pub filter: Option<String>,
    /// Comma-separated relation names to inline.
    pub expand: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: DEFAULT_SORT.into(),
            filter: None,
            expand: None,
        }
    }
}

impl ListParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Render as query pairs. Empty filter/expand are omitted entirely.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
            ("sort", self.sort.clone()),
        ];
        if let Some(ref filter) = self.filter {
            if !filter.is_empty() {
                pairs.push(("filter", filter.clone()));
            }
        }
        if let Some(ref expand) = self.expand {
            if !expand.is_empty() {
                pairs.push(("expand", expand.clone()));
            }
        }
        pairs
    }
}

/// One page of records from a `list` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> ListPage<T> {
    /// Map the items while preserving the page envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let p = ListParams::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 50);
        assert_eq!(p.sort, "-created");
        assert!(p.filter.is_none());
        assert!(p.expand.is_none());
    }

    #[test]
    fn empty_filter_is_omitted() {
        let p = ListParams::default().filter("");
        let pairs = p.query_pairs();
        assert!(pairs.iter().all(|(k, _)| *k != "filter"));
    }

    #[test]
    fn filter_and_expand_are_rendered() {
        let p = ListParams::default().filter("status = \"online\"").expand("app");
        let pairs = p.query_pairs();
        assert!(pairs.contains(&("filter", "status = \"online\"".into())));
        assert!(pairs.contains(&("expand", "app".into())));
    }
}
