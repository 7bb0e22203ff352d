use chrono::NaiveDate;

use crate::{db::propertydb::PropertySearchFilters, error::HttpError};

/// A search request translated for both consumers at once: the typed store
/// query and the cache key it is filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub filters: PropertySearchFilters,
    pub cache_key: String,
}

/// Decode a raw query string into ordered key/value pairs. Repeated keys are
/// kept; HTTP does not guarantee any ordering, canonicalization happens in
/// `canonical_cache_key`.
pub fn decode_params(raw_query: &str) -> Result<Vec<(String, String)>, HttpError> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(raw_query)
        .map_err(|_| HttpError::bad_request("Invalid query string"))
}

pub fn build_search_query(params: &[(String, String)]) -> Result<SearchQuery, HttpError> {
    Ok(SearchQuery {
        filters: build_filters(params)?,
        cache_key: canonical_cache_key(params),
    })
}

/// Map loosely-typed request parameters onto typed store constraints.
/// Unrecognized keys impose no constraint; bad coercions are the caller's
/// error.
pub fn build_filters(params: &[(String, String)]) -> Result<PropertySearchFilters, HttpError> {
    let mut filters = PropertySearchFilters::default();

    for (key, value) in params {
        match key.as_str() {
            "type" => filters.property_type = Some(value.clone()),
            "state" => filters.state = Some(value.clone()),
            "city" => filters.city = Some(value.clone()),
            "furnished" => filters.furnished = Some(value.clone()),
            "listedBy" => filters.listed_by = Some(value.clone()),
            "colorTheme" => filters.color_theme = Some(value.clone()),
            "listingType" => filters.listing_type = Some(value.clone()),
            // present but not "true" reads as false
            "isVerified" => filters.is_verified = Some(value == "true"),
            "bedrooms" => filters.bedrooms = Some(parse_int(key, value)?),
            "bathrooms" => filters.bathrooms = Some(parse_int(key, value)?),
            "minPrice" => filters.min_price = Some(parse_number(key, value)?),
            "maxPrice" => filters.max_price = Some(parse_number(key, value)?),
            "minArea" => filters.min_area = Some(parse_number(key, value)?),
            "maxArea" => filters.max_area = Some(parse_number(key, value)?),
            "minRating" => filters.min_rating = Some(parse_number(key, value)?),
            "availableFrom" => filters.available_from = Some(parse_date(key, value)?),
            "amenities" => append_set(&mut filters.amenities, value),
            "tags" => append_set(&mut filters.tags, value),
            _ => {}
        }
    }

    Ok(filters)
}

/// Canonical serialization of the exact received parameter set: pairs sorted
/// by key then value, so identical sets always land on the same cache key no
/// matter how the transport ordered them.
pub fn canonical_cache_key(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = params.iter().collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_number(key: &str, value: &str) -> Result<f64, HttpError> {
    value
        .parse::<f64>()
        .map_err(|_| HttpError::bad_request(format!("Invalid numeric value for {}: {}", key, value)))
}

fn parse_int(key: &str, value: &str) -> Result<i32, HttpError> {
    value
        .parse::<i32>()
        .map_err(|_| HttpError::bad_request(format!("Invalid numeric value for {}: {}", key, value)))
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, HttpError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| HttpError::bad_request(format!("Invalid date value for {}: {}", key, value)))
}

// comma-separated values and repeated keys both accumulate into one set
fn append_set(set: &mut Vec<String>, value: &str) {
    for item in value.split(',') {
        let item = item.trim();
        if !item.is_empty() && !set.iter().any(|existing| existing == item) {
            set.push(item.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_params_impose_no_constraint() {
        let query = build_search_query(&[]).unwrap();
        assert_eq!(query.filters, PropertySearchFilters::default());
        assert_eq!(query.cache_key, "");
    }

    #[test]
    fn equality_params_map_to_equality_filters() {
        let filters = build_filters(&params(&[
            ("type", "Apartment"),
            ("state", "Maharashtra"),
            ("city", "Pune"),
            ("furnished", "Semi"),
            ("listedBy", "Owner"),
            ("colorTheme", "#6ab45e"),
            ("listingType", "rent"),
        ]))
        .unwrap();

        assert_eq!(filters.property_type.as_deref(), Some("Apartment"));
        assert_eq!(filters.state.as_deref(), Some("Maharashtra"));
        assert_eq!(filters.city.as_deref(), Some("Pune"));
        assert_eq!(filters.furnished.as_deref(), Some("Semi"));
        assert_eq!(filters.listed_by.as_deref(), Some("Owner"));
        assert_eq!(filters.color_theme.as_deref(), Some("#6ab45e"));
        assert_eq!(filters.listing_type.as_deref(), Some("rent"));
    }

    #[test]
    fn is_verified_only_accepts_literal_true() {
        let filters = build_filters(&params(&[("isVerified", "true")])).unwrap();
        assert_eq!(filters.is_verified, Some(true));

        for other in ["false", "TRUE", "1", "yes", ""] {
            let filters = build_filters(&params(&[("isVerified", other)])).unwrap();
            assert_eq!(filters.is_verified, Some(false), "value {:?}", other);
        }

        let filters = build_filters(&[]).unwrap();
        assert_eq!(filters.is_verified, None);
    }

    #[test]
    fn numeric_params_are_coerced() {
        let filters = build_filters(&params(&[
            ("bedrooms", "2"),
            ("bathrooms", "1"),
            ("minPrice", "100000"),
            ("maxPrice", "300000.5"),
            ("minArea", "500"),
            ("maxArea", "1500"),
            ("minRating", "3.5"),
        ]))
        .unwrap();

        assert_eq!(filters.bedrooms, Some(2));
        assert_eq!(filters.bathrooms, Some(1));
        assert_eq!(filters.min_price, Some(100000.0));
        assert_eq!(filters.max_price, Some(300000.5));
        assert_eq!(filters.min_area, Some(500.0));
        assert_eq!(filters.max_area, Some(1500.0));
        assert_eq!(filters.min_rating, Some(3.5));
    }

    #[test]
    fn range_bounds_are_independently_optional() {
        let filters = build_filters(&params(&[("maxPrice", "300000")])).unwrap();
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, Some(300000.0));
    }

    #[test]
    fn bad_numeric_value_is_a_caller_error() {
        let err = build_filters(&params(&[("minPrice", "cheap")])).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("minPrice"));

        let err = build_filters(&params(&[("bedrooms", "two")])).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_date_value_is_a_caller_error() {
        let err = build_filters(&params(&[("availableFrom", "next tuesday")])).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("availableFrom"));
    }

    #[test]
    fn available_from_parses_iso_dates() {
        let filters = build_filters(&params(&[("availableFrom", "2025-09-01")])).unwrap();
        assert_eq!(
            filters.available_from,
            Some(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
    }

    #[test]
    fn amenities_accumulate_from_commas_and_repeats() {
        let filters = build_filters(&params(&[
            ("amenities", "pool,gym"),
            ("amenities", "parking"),
            ("tags", "near-metro, luxury"),
        ]))
        .unwrap();

        assert_eq!(filters.amenities, vec!["pool", "gym", "parking"]);
        assert_eq!(filters.tags, vec!["near-metro", "luxury"]);
    }

    #[test]
    fn duplicate_set_values_are_kept_once() {
        let filters =
            build_filters(&params(&[("amenities", "pool,pool"), ("amenities", "pool")])).unwrap();
        assert_eq!(filters.amenities, vec!["pool"]);
    }

    #[test]
    fn unrecognized_params_are_ignored_by_the_query() {
        let filters = build_filters(&params(&[("sortBy", "price"), ("city", "Pune")])).unwrap();
        let expected = PropertySearchFilters {
            city: Some("Pune".to_string()),
            ..Default::default()
        };
        assert_eq!(filters, expected);
    }

    #[test]
    fn cache_key_is_order_insensitive() {
        let a = canonical_cache_key(&params(&[
            ("minPrice", "100000"),
            ("city", "Pune"),
            ("amenities", "pool,gym"),
        ]));
        let b = canonical_cache_key(&params(&[
            ("amenities", "pool,gym"),
            ("minPrice", "100000"),
            ("city", "Pune"),
        ]));

        assert_eq!(a, b);
        assert_eq!(a, "amenities=pool,gym&city=Pune&minPrice=100000");
    }

    #[test]
    fn cache_key_reflects_the_exact_parameter_set() {
        let with_extra = canonical_cache_key(&params(&[("city", "Pune"), ("sortBy", "price")]));
        let without = canonical_cache_key(&params(&[("city", "Pune")]));
        assert_ne!(with_extra, without);
    }

    #[test]
    fn distinct_parameter_sets_produce_distinct_keys() {
        let a = canonical_cache_key(&params(&[("city", "Pune")]));
        let b = canonical_cache_key(&params(&[("city", "Mumbai")]));
        let c = canonical_cache_key(&params(&[("state", "Pune")]));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn decode_params_keeps_repeated_keys() {
        let pairs = decode_params("amenities=pool&amenities=gym&city=Pune").unwrap();
        assert_eq!(
            pairs,
            params(&[("amenities", "pool"), ("amenities", "gym"), ("city", "Pune")])
        );
    }

    #[test]
    fn decode_params_handles_percent_encoding() {
        let pairs = decode_params("city=New%20Delhi&listedBy=Agent").unwrap();
        assert_eq!(pairs[0].1, "New Delhi");
    }

    #[test]
    fn spec_example_filters_search() {
        let pairs =
            decode_params("minPrice=100000&maxPrice=300000&bedrooms=2&amenities=pool,gym").unwrap();
        let query = build_search_query(&pairs).unwrap();

        assert_eq!(query.filters.min_price, Some(100000.0));
        assert_eq!(query.filters.max_price, Some(300000.0));
        assert_eq!(query.filters.bedrooms, Some(2));
        assert_eq!(query.filters.amenities, vec!["pool", "gym"]);
        assert_eq!(
            query.cache_key,
            "amenities=pool,gym&bedrooms=2&maxPrice=300000&minPrice=100000"
        );
    }
}
