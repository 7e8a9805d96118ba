//! Pagination types for paginated collection endpoints.
//!
//! The backend owns pagination entirely; the client never computes page
//! metadata itself, it only builds control ranges from what the server sent.

use serde::{Deserialize, Serialize};

/// Server-produced pagination metadata.
///
/// Invariants (enforced by the server, checked by [`PaginationMeta::is_consistent`]):
/// `current_page <= last_page` and `from <= to <= total`, or all of
/// `from`/`to`/`total` are zero for an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub from: u64,
    pub to: u64,
}

impl PaginationMeta {
    /// Returns true when the metadata satisfies its internal invariants.
    pub fn is_consistent(&self) -> bool {
        if self.total == 0 {
            return self.from == 0 && self.to == 0;
        }
        self.current_page <= self.last_page && self.from <= self.to && self.to <= self.total
    }

    /// Returns true when there is a page after the current one.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Returns true when there is a page before the current one.
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Builds the page-number range shown in pagination controls: up to
    /// `window` pages centered on the current page, clamped to
    /// `1..=last_page`.
    pub fn control_range(&self, window: u32) -> Vec<u32> {
        if self.last_page == 0 || window == 0 {
            return Vec::new();
        }
        let half = window / 2;
        let start = self.current_page.saturating_sub(half).max(1);
        let end = (start + window - 1).min(self.last_page);
        let start = end.saturating_sub(window - 1).max(1);
        (start..=end).collect()
    }
}

/// One page of a server collection: the items plus the pagination metadata
/// that accompanied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    /// An empty page with zeroed metadata.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: PaginationMeta::default(),
        }
    }
}

/// Wire envelope for paginated collection responses:
/// `{ "data": [...], "meta": { "pagination": {...} } }`.
///
/// `meta` is optional on the wire; non-paginated endpoints share the same
/// `data` wrapper without it.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<EnvelopeMeta>,
}

/// The `meta` object of a collection envelope.
#[derive(Debug, Deserialize)]
pub struct EnvelopeMeta {
    pub pagination: PaginationMeta,
}

impl<T> Envelope<T> {
    /// Converts the envelope into a [`Page`], substituting single-page
    /// metadata when the server sent none.
    pub fn into_page(self) -> Page<T> {
        let count = self.data.len();
        let meta = match self.meta {
            Some(m) => m.pagination,
            None => PaginationMeta {
                current_page: 1,
                last_page: 1,
                per_page: count as u32,
                total: count as u64,
                from: if count == 0 { 0 } else { 1 },
                to: count as u64,
            },
        };
        Page {
            items: self.data,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current: u32, last: u32) -> PaginationMeta {
        PaginationMeta {
            current_page: current,
            last_page: last,
            per_page: 10,
            total: (last as u64) * 10,
            from: ((current as u64) - 1) * 10 + 1,
            to: (current as u64) * 10,
        }
    }

    #[test]
    fn test_consistency() {
        assert!(meta(1, 5).is_consistent());
        assert!(meta(5, 5).is_consistent());
        assert!(
            PaginationMeta::default().is_consistent(),
            "all-zero meta is the empty collection"
        );

        let broken = PaginationMeta {
            current_page: 6,
            last_page: 5,
            ..meta(1, 5)
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_control_range_centered() {
        assert_eq!(meta(5, 10).control_range(5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_control_range_clamped_at_edges() {
        assert_eq!(meta(1, 10).control_range(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(meta(10, 10).control_range(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(meta(1, 2).control_range(5), vec![1, 2]);
        assert_eq!(meta(1, 0).control_range(5), Vec::<u32>::new());
    }

    #[test]
    fn test_envelope_without_meta_is_single_page() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"data": [1, 2, 3]}"#).expect("Should parse envelope");
        let page = envelope.into_page();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.last_page, 1);
        assert_eq!(page.meta.total, 3);
        assert!(page.meta.is_consistent());
    }

    #[test]
    fn test_envelope_with_meta() {
        let json = r#"{
            "data": ["a", "b"],
            "meta": {"pagination": {
                "current_page": 2, "last_page": 3, "per_page": 2,
                "total": 6, "from": 3, "to": 4
            }}
        }"#;
        let envelope: Envelope<String> =
            serde_json::from_str(json).expect("Should parse envelope");
        let page = envelope.into_page();
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.total, 6);
        assert!(page.meta.is_consistent());
    }
}
