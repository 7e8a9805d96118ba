//! Query-string codec for [`FilterSet`].
//!
//! Encoding emits only keys with defined values; booleans serialize as the
//! literal strings `true`/`false`; composite keys (attributes, proximity)
//! expand to bracketed parameters. Decoding is permissive: unknown keys are
//! ignored and malformed numerics fall back to "no constraint".

use std::collections::{BTreeMap, BTreeSet};

use url::form_urlencoded;

use crate::filter::model::{FilterSet, Proximity, SortOrder};

/// Encodes a filter set as a URL query string (no leading `?`).
pub fn encode(filters: &FilterSet) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    // Empty strings mean "no constraint", exactly as on the decode side.
    if let Some(search) = non_empty_ref(&filters.search) {
        serializer.append_pair("search", search);
    }
    if let Some(category) = non_empty_ref(&filters.category) {
        serializer.append_pair("category", category);
    }
    if let Some(subcategory) = non_empty_ref(&filters.subcategory) {
        serializer.append_pair("subcategory", subcategory);
    }
    if let Some(shop_id) = filters.shop_id {
        serializer.append_pair("shop_id", &shop_id.to_string());
    }
    if let Some(min_price) = filters.min_price {
        serializer.append_pair("min_price", &min_price.to_string());
    }
    if let Some(max_price) = filters.max_price {
        serializer.append_pair("max_price", &max_price.to_string());
    }
    if let Some(in_stock) = filters.in_stock {
        serializer.append_pair("in_stock", if in_stock { "true" } else { "false" });
    }
    if let Some(sort) = filters.sort {
        serializer.append_pair("sort", sort.as_str());
    }
    for (name, value_ids) in &filters.attributes {
        if value_ids.is_empty() {
            continue;
        }
        let joined = value_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        serializer.append_pair(&format!("attrs[{name}]"), &joined);
    }
    if let Some(near) = &filters.near {
        serializer.append_pair("near[lat]", &near.lat.to_string());
        serializer.append_pair("near[lng]", &near.lng.to_string());
        serializer.append_pair("near[radius]", &near.radius.to_string());
    }
    if let Some(page) = filters.page {
        serializer.append_pair("page", &page.to_string());
    }
    if let Some(per_page) = filters.per_page {
        serializer.append_pair("per_page", &per_page.to_string());
    }

    serializer.finish()
}

/// Decodes a query string (with or without a leading `?`) into a filter set.
pub fn decode(query: &str) -> FilterSet {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut filters = FilterSet::new();
    let mut attributes: BTreeMap<String, BTreeSet<u64>> = BTreeMap::new();
    let mut near_lat: Option<f64> = None;
    let mut near_lng: Option<f64> = None;
    let mut near_radius: Option<f64> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "search" => filters.search = non_empty(&value),
            "category" => filters.category = non_empty(&value),
            "subcategory" => filters.subcategory = non_empty(&value),
            "shop_id" => filters.shop_id = value.parse().ok(),
            "min_price" => filters.min_price = value.parse().ok(),
            "max_price" => filters.max_price = value.parse().ok(),
            "in_stock" => {
                filters.in_stock = match value.as_ref() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }
            }
            "sort" => filters.sort = SortOrder::parse(&value),
            "near[lat]" => near_lat = value.parse().ok(),
            "near[lng]" => near_lng = value.parse().ok(),
            "near[radius]" => near_radius = value.parse().ok(),
            "page" => filters.page = value.parse().ok(),
            "per_page" => filters.per_page = value.parse().ok(),
            other => {
                if let Some(name) = bracket_name(other, "attrs") {
                    let ids: BTreeSet<u64> = value
                        .split(',')
                        .filter_map(|id| id.trim().parse().ok())
                        .collect();
                    if !ids.is_empty() {
                        attributes.insert(name.to_string(), ids);
                    }
                }
                // Any other key is simply ignored.
            }
        }
    }

    filters.attributes = attributes;
    if let (Some(lat), Some(lng), Some(radius)) = (near_lat, near_lng, near_radius) {
        filters.near = Some(Proximity { lat, lng, radius });
    }

    filters
}

/// Extracts `name` from a `prefix[name]` key, if the key has that shape.
fn bracket_name<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_empty_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_filter_set() -> FilterSet {
        FilterSet::new()
            .with_search("summer jeans")
            .with_category("clothes")
            .with_subcategory("jeans")
            .with_shop_id(42)
            .with_price_range(Some(10.5), Some(200.0))
            .with_in_stock(true)
            .with_sort(SortOrder::PriceAsc)
            .with_attribute("color", BTreeSet::from([1, 3, 7]))
            .with_attribute("size", BTreeSet::from([12]))
            .with_near(Proximity {
                lat: 41.015,
                lng: 28.979,
                radius: 5.0,
            })
            .with_page(3)
            .with_per_page(24)
    }

    #[test]
    fn test_round_trip_full() {
        let filters = full_filter_set();
        assert_eq!(decode(&encode(&filters)), filters);
    }

    #[test]
    fn test_round_trip_empty() {
        let filters = FilterSet::new();
        assert_eq!(encode(&filters), "");
        assert_eq!(decode(""), filters);
    }

    #[test]
    fn test_scenario_search_and_page() {
        let filters = FilterSet::new().with_search("jeans").with_page(2);
        assert_eq!(encode(&filters), "search=jeans&page=2");

        let decoded = decode("?search=jeans&page=2");
        assert_eq!(decoded.search.as_deref(), Some("jeans"));
        assert_eq!(decoded.page, Some(2));
        assert!(decoded.category.is_none());
        assert!(decoded.shop_id.is_none());
        assert_eq!(decoded, filters);
    }

    #[test]
    fn test_booleans_are_literal_strings() {
        let encoded = encode(&FilterSet::new().with_in_stock(false));
        assert_eq!(encoded, "in_stock=false");
        assert_eq!(decode("in_stock=1").in_stock, None);
    }

    #[test]
    fn test_bracketed_composites() {
        let filters = FilterSet::new()
            .with_attribute("color", BTreeSet::from([2, 5]))
            .with_near(Proximity {
                lat: 1.5,
                lng: -2.25,
                radius: 10.0,
            });
        let encoded = encode(&filters);
        assert!(encoded.contains("attrs%5Bcolor%5D=2%2C5"));
        assert!(encoded.contains("near%5Blat%5D=1.5"));
        assert_eq!(decode(&encoded), filters);
    }

    #[test]
    fn test_empty_string_values_are_no_constraints() {
        let filters = FilterSet::new()
            .with_search("")
            .with_category("")
            .with_subcategory("");
        assert_eq!(encode(&filters), "", "empty strings must not be emitted");
        // The round trip normalizes to the unconstrained set, the same
        // result decoding an empty-valued key would produce.
        assert_eq!(decode(&encode(&filters)), FilterSet::new());
        assert!(decode("search=&category=").search.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let decoded = decode("search=jeans&utm_source=mail&weird[key]=1");
        assert_eq!(decoded, FilterSet::new().with_search("jeans"));
    }

    #[test]
    fn test_malformed_numbers_fall_back_to_no_constraint() {
        let decoded = decode("shop_id=abc&min_price=cheap&page=二");
        assert!(decoded.shop_id.is_none());
        assert!(decoded.min_price.is_none());
        assert!(decoded.page.is_none());
    }

    #[test]
    fn test_incomplete_proximity_is_dropped() {
        let decoded = decode("near[lat]=1.0&near[lng]=2.0");
        assert!(decoded.near.is_none());
    }

    #[test]
    fn test_order_independence_on_decode() {
        let a = decode("category=clothes&search=jeans");
        let b = decode("search=jeans&category=clothes");
        assert_eq!(a, b);
    }
}
