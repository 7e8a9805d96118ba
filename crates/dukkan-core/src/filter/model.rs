//! The canonical filter set for listing screens.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Sort orders the listing endpoints accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    PriceAsc,
    PriceDesc,
    Popular,
}

impl SortOrder {
    /// Wire representation used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::Popular => "popular",
        }
    }

    /// Parses a wire value; unknown values yield `None` (no constraint).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(SortOrder::Newest),
            "price_asc" => Some(SortOrder::PriceAsc),
            "price_desc" => Some(SortOrder::PriceDesc),
            "popular" => Some(SortOrder::Popular),
            _ => None,
        }
    }
}

/// A proximity constraint: center coordinates plus a radius in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
}

/// The full set of active constraints for a listing screen.
///
/// An absent (`None`/empty) field means "no constraint", never "empty
/// value". FilterSets are replaced, not mutated in place: every `with_*`
/// builder consumes the previous set and returns a new one, so consumers
/// can compare snapshots by value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    /// Attribute filters: attribute name to the set of selected value ids.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, BTreeSet<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<Proximity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl FilterSet {
    /// An unconstrained filter set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn with_subcategory(mut self, slug: impl Into<String>) -> Self {
        self.subcategory = Some(slug.into());
        self
    }

    pub fn without_subcategory(mut self) -> Self {
        self.subcategory = None;
        self
    }

    pub fn with_shop_id(mut self, id: u64) -> Self {
        self.shop_id = Some(id);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value_ids: BTreeSet<u64>) -> Self {
        if value_ids.is_empty() {
            self.attributes.remove(&name.into());
        } else {
            self.attributes.insert(name.into(), value_ids);
        }
        self
    }

    pub fn with_near(mut self, near: Proximity) -> Self {
        self.near = Some(near);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Compares every constraint except the page number.
    ///
    /// Listing controllers use this to decide whether a new filter set
    /// forces the page back to 1.
    pub fn same_constraints(&self, other: &FilterSet) -> bool {
        let a = Self {
            page: None,
            ..self.clone()
        };
        let b = Self {
            page: None,
            ..other.clone()
        };
        a == b
    }

    /// Returns true when no constraint is active (page alone does not
    /// count as a constraint).
    pub fn is_unconstrained(&self) -> bool {
        self.same_constraints(&FilterSet::default())
    }
}
