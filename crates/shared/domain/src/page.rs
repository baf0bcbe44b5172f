//! Transient shapes of one fetch round.

use serde_json::Value;

/// Pagination metadata as reported by the API. Any part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: Option<u64>,
    pub last_page: Option<u64>,
    pub total: Option<u64>,
}

/// A list response in one of the two shapes the API produces.
#[derive(Debug, Clone, PartialEq)]
pub enum PaginatedBody {
    /// `{data: [...], current_page, last_page, total}`.
    Wrapped { data: Vec<Value>, meta: PageMeta },
    /// A bare array without pagination metadata.
    Bare(Vec<Value>),
}

/// One page's raw entries plus metadata, normalized from either body shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub entries: Vec<Value>,
    pub meta: PageMeta,
    /// The body carried no pagination; it is the whole collection.
    pub complete: bool,
}

impl PageResult {
    /// True when the metadata says no page follows this one.
    #[must_use]
    pub fn is_last(&self, requested_page: u64) -> bool {
        if self.complete {
            return true;
        }
        let current = self.meta.current_page.unwrap_or(requested_page);
        self.meta.last_page.is_some_and(|last| current >= last)
    }
}

impl From<PaginatedBody> for PageResult {
    fn from(body: PaginatedBody) -> Self {
        match body {
            PaginatedBody::Wrapped { data, meta } => Self { entries: data, meta, complete: false },
            PaginatedBody::Bare(entries) => {
                let total = u64::try_from(entries.len()).ok();
                Self {
                    entries,
                    meta: PageMeta { current_page: Some(1), last_page: Some(1), total },
                    complete: true,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_body_is_a_single_complete_page() {
        let page = PageResult::from(PaginatedBody::Bare(vec![json!({"id": 1})]));
        assert!(page.complete);
        assert!(page.is_last(1));
        assert_eq!(page.meta.total, Some(1));
    }

    #[test]
    fn wrapped_body_ends_at_last_page() {
        let meta = PageMeta { current_page: Some(2), last_page: Some(3), total: Some(250) };
        let page = PageResult::from(PaginatedBody::Wrapped { data: vec![], meta });
        assert!(!page.is_last(2));

        let meta = PageMeta { current_page: None, last_page: Some(3), total: None };
        let page = PageResult::from(PaginatedBody::Wrapped { data: vec![], meta });
        assert!(page.is_last(3));
        assert!(page.is_last(4));

        let page = PageResult::from(PaginatedBody::Wrapped { data: vec![], meta: PageMeta::default() });
        assert!(!page.is_last(1), "without last_page the loop relies on other stop rules");
    }
}
