//! Post-retrieval structured filters. Pure functions, no side effects;
//! all present filters are ANDed.

use mensa_core::models::{QueryFilters, SearchResult};

/// Apply all present filters to a result list, preserving order.
pub fn apply_filters(results: Vec<SearchResult>, filters: &QueryFilters) -> Vec<SearchResult> {
    if filters.is_empty() {
        return results;
    }
    results
        .into_iter()
        .filter(|r| passes(r, filters))
        .collect()
}

fn passes(result: &SearchResult, filters: &QueryFilters) -> bool {
    if let Some(price_max) = filters.price_max {
        // Missing price excludes: the filter can't vouch for the result.
        match result.meta_f64("price") {
            Some(price) if price <= price_max => {}
            _ => return false,
        }
    }

    if let Some(dietary) = &filters.dietary {
        let term = dietary.to_lowercase();
        let description = result.meta_str("description").to_lowercase();
        let text = result.meta_str("text").to_lowercase();
        if !description.contains(&term) && !text.contains(&term) {
            return false;
        }
    }

    if let Some(location) = &filters.location {
        let term = location.to_lowercase();
        let matched = ["address", "city", "state"]
            .iter()
            .any(|field| result.meta_str(field).to_lowercase().contains(&term));
        if !matched {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(meta: serde_json::Value) -> SearchResult {
        SearchResult {
            id: "r".into(),
            score: 1.0,
            metadata: meta.as_object().cloned().unwrap(),
        }
    }

    fn price_filter(price_max: f64) -> QueryFilters {
        QueryFilters {
            price_max: Some(price_max),
            ..Default::default()
        }
    }

    #[test]
    fn price_boundary_semantics() {
        let r = result(json!({"price": 12.99}));
        assert_eq!(apply_filters(vec![r.clone()], &price_filter(15.0)).len(), 1);
        assert_eq!(apply_filters(vec![r], &price_filter(10.0)).len(), 0);
    }

    #[test]
    fn missing_price_is_excluded() {
        let r = result(json!({"name": "mystery dish"}));
        assert!(apply_filters(vec![r], &price_filter(100.0)).is_empty());
    }

    #[test]
    fn dietary_checks_description_and_text() {
        let filters = QueryFilters {
            dietary: Some("Vegan".into()),
            ..Default::default()
        };
        let in_description = result(json!({"description": "fully VEGAN bowl", "text": ""}));
        let in_text = result(json!({"description": "", "text": "vegan jackfruit taco"}));
        let neither = result(json!({"description": "pork", "text": "carnitas"}));
        assert_eq!(
            apply_filters(vec![in_description, in_text, neither], &filters).len(),
            2
        );
    }

    #[test]
    fn location_checks_address_city_state() {
        let filters = QueryFilters {
            location: Some("boston".into()),
            ..Default::default()
        };
        let by_city = result(json!({"city": "Boston", "address": "", "state": "MA"}));
        let by_address = result(json!({"city": "", "address": "12 Boston Ave", "state": ""}));
        let elsewhere = result(json!({"city": "Cambridge", "address": "", "state": "MA"}));
        assert_eq!(
            apply_filters(vec![by_city, by_address, elsewhere], &filters).len(),
            2
        );
    }

    #[test]
    fn filters_are_anded() {
        let filters = QueryFilters {
            price_max: Some(15.0),
            dietary: Some("vegan".into()),
            ..Default::default()
        };
        let both = result(json!({"price": 12.99, "description": "vegan taco", "text": ""}));
        let price_only = result(json!({"price": 12.99, "description": "pork", "text": ""}));
        let dietary_only = result(json!({"price": 22.0, "description": "vegan feast", "text": ""}));
        assert_eq!(
            apply_filters(vec![both, price_only, dietary_only], &filters).len(),
            1
        );
    }

    #[test]
    fn empty_filters_pass_everything_through() {
        let r = result(json!({}));
        assert_eq!(apply_filters(vec![r], &QueryFilters::default()).len(), 1);
    }
}
