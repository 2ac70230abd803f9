//! Tests for the filter and pagination contract
//!
//! # Test Organization
//!
//! - `validation` - malformed requests are rejected with the right error
//! - `evaluation` - predicates follow SQL semantics on typed values
//! - `ordering` - row comparison used by in-memory paging
//! - `properties` - pagination invariants under random input

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::filter::{
    FieldDef, FieldKind, FieldValue, FilterCriterion, FilterError, FilterOperator,
    FilterRequest, PaginationRequest, PaginationResponse, SortDirection, MAX_PAGE_SIZE,
};
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

static FIELDS: &[FieldDef] = &[
    FieldDef::new("id", FieldKind::Uuid),
    FieldDef::new("party_id", FieldKind::Uuid),
    FieldDef::new("city", FieldKind::Text),
    FieldDef::new("postal_code", FieldKind::Text),
    FieldDef::new("is_primary", FieldKind::Bool),
    FieldDef::new("valid_from", FieldKind::Date),
    FieldDef::new("latitude", FieldKind::Decimal),
    FieldDef::new("headcount", FieldKind::Integer),
    FieldDef::new("created_at", FieldKind::Timestamp),
];

fn row(city: &str, postal_code: Option<&str>, headcount: i64) -> Vec<FieldValue> {
    vec![
        FieldValue::Uuid(Uuid::new_v4()),
        FieldValue::Uuid(Uuid::new_v4()),
        FieldValue::from(city),
        FieldValue::from(postal_code),
        FieldValue::Bool(true),
        FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        FieldValue::Decimal(dec!(40.4168)),
        FieldValue::Integer(headcount),
        FieldValue::Timestamp(Utc::now()),
    ]
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_empty_request_is_valid() {
        let query = FilterRequest::new().validate(FIELDS).unwrap();
        assert!(query.predicates.is_empty());
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn test_unknown_field() {
        let request = FilterRequest::new().with(FilterCriterion::equals("nickname", "x"));
        assert_eq!(
            request.validate(FIELDS),
            Err(FilterError::UnknownField("nickname".to_string()))
        );
    }

    #[test]
    fn test_unknown_sort_field() {
        let request = FilterRequest::new().sort("nickname", SortDirection::Asc);
        assert_eq!(
            request.validate(FIELDS),
            Err(FilterError::UnknownSortField("nickname".to_string()))
        );
    }

    #[test]
    fn test_page_size_zero_rejected() {
        let request = FilterRequest::new().page(0, 0);
        assert_eq!(request.validate(FIELDS), Err(FilterError::InvalidPageSize(0)));
    }

    #[test]
    fn test_page_size_above_max_rejected() {
        let request = FilterRequest::new().page(0, MAX_PAGE_SIZE + 1);
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::InvalidPageSize(_))
        ));
    }

    #[test]
    fn test_missing_value() {
        let request = FilterRequest::new().with(FilterCriterion::new(
            "city",
            FilterOperator::Equals,
            None,
        ));
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_null_value_counts_as_missing() {
        let request = FilterRequest::new().with(FilterCriterion::new(
            "city",
            FilterOperator::Equals,
            Some(json!(null)),
        ));
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_unexpected_value_for_is_null() {
        let request = FilterRequest::new().with(FilterCriterion::new(
            "city",
            FilterOperator::IsNull,
            Some(json!("Madrid")),
        ));
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::UnexpectedValue { .. })
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let request = FilterRequest::new().with(FilterCriterion::equals("headcount", "many"));
        assert_eq!(
            request.validate(FIELDS),
            Err(FilterError::TypeMismatch {
                field: "headcount".to_string(),
                expected: FieldKind::Integer,
            })
        );
    }

    #[test]
    fn test_invalid_uuid_is_type_mismatch() {
        let request = FilterRequest::new().with(FilterCriterion::equals("party_id", "abc"));
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_ordering_rejected_on_uuid() {
        let request = FilterRequest::new().with(FilterCriterion::new(
            "party_id",
            FilterOperator::GreaterThan,
            Some(json!(Uuid::new_v4())),
        ));
        assert!(matches!(
            request.validate(FIELDS),
            Err(FilterError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_in_requires_non_empty_array() {
        let empty = FilterRequest::new().with(FilterCriterion::new(
            "city",
            FilterOperator::In,
            Some(json!([])),
        ));
        assert_eq!(
            empty.validate(FIELDS),
            Err(FilterError::InvalidList("city".to_string()))
        );

        let scalar = FilterRequest::new().with(FilterCriterion::new(
            "city",
            FilterOperator::In,
            Some(json!("Madrid")),
        ));
        assert!(matches!(scalar.validate(FIELDS), Err(FilterError::InvalidList(_))));
    }

    #[test]
    fn test_decimal_accepts_number_and_string() {
        for value in [json!(40.4168), json!("40.4168")] {
            let query = FilterRequest::new()
                .with(FilterCriterion::equals("latitude", value))
                .validate(FIELDS)
                .unwrap();
            assert!(query.matches(&row("Madrid", None, 1)));
        }
    }

    #[test]
    fn test_deserializes_wire_format() {
        let request: FilterRequest = serde_json::from_value(json!({
            "filters": [
                { "field": "city", "operator": "STARTS_WITH", "value": "Ma" },
                { "field": "postal_code", "operator": "IS_NOT_NULL" }
            ],
            "pagination": { "page_number": 2, "sort_by": "city", "sort_direction": "ASC" }
        }))
        .unwrap();

        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.pagination.page_size, 10);
        let query = request.validate(FIELDS).unwrap();
        assert_eq!(query.offset(), 20);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }
}

// ============================================================================
// Evaluation
// ============================================================================

mod evaluation {
    use super::*;

    fn matches(criterion: FilterCriterion, values: &[FieldValue]) -> bool {
        FilterRequest::new()
            .with(criterion)
            .validate(FIELDS)
            .unwrap()
            .matches(values)
    }

    #[test]
    fn test_equals_and_not_equals() {
        let r = row("Madrid", Some("28001"), 5);
        assert!(matches(FilterCriterion::equals("city", "Madrid"), &r));
        assert!(!matches(FilterCriterion::equals("city", "madrid"), &r));
        assert!(matches(
            FilterCriterion::new("city", FilterOperator::NotEquals, Some(json!("Paris"))),
            &r
        ));
    }

    #[test]
    fn test_comparison_with_null_is_false() {
        let r = row("Madrid", None, 5);
        assert!(!matches(FilterCriterion::equals("postal_code", "28001"), &r));
        assert!(!matches(
            FilterCriterion::new("postal_code", FilterOperator::NotEquals, Some(json!("28001"))),
            &r
        ));
        assert!(matches(FilterCriterion::is_null("postal_code"), &r));
    }

    #[test]
    fn test_ordering_operators() {
        let r = row("Madrid", None, 50);
        let gt = |v: i64| FilterCriterion::new("headcount", FilterOperator::GreaterThan, Some(json!(v)));
        let lte = |v: i64| {
            FilterCriterion::new("headcount", FilterOperator::LessThanOrEqual, Some(json!(v)))
        };
        assert!(matches(gt(49), &r));
        assert!(!matches(gt(50), &r));
        assert!(matches(lte(50), &r));
        assert!(!matches(lte(49), &r));
    }

    #[test]
    fn test_date_comparison() {
        let r = row("Madrid", None, 1);
        assert!(matches(
            FilterCriterion::new("valid_from", FilterOperator::LessThan, Some(json!("2024-03-02"))),
            &r
        ));
    }

    #[test]
    fn test_in() {
        let r = row("Lisbon", None, 1);
        assert!(matches(
            FilterCriterion::new("city", FilterOperator::In, Some(json!(["Madrid", "Lisbon"]))),
            &r
        ));
        assert!(!matches(
            FilterCriterion::new("city", FilterOperator::In, Some(json!(["Madrid", "Porto"]))),
            &r
        ));
    }

    #[test]
    fn test_starts_with() {
        let r = row("Barcelona", None, 1);
        assert!(matches(
            FilterCriterion::new("city", FilterOperator::StartsWith, Some(json!("bar"))),
            &r
        ));
        assert!(!matches(
            FilterCriterion::new("city", FilterOperator::StartsWith, Some(json!("celona"))),
            &r
        ));
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let r = row("Madrid", Some("28001"), 1);
        let query = FilterRequest::new()
            .with(FilterCriterion::equals("city", "Madrid"))
            .with(FilterCriterion::equals("postal_code", "08001"))
            .validate(FIELDS)
            .unwrap();
        assert!(!query.matches(&r));
    }
}

// ============================================================================
// Ordering
// ============================================================================

mod ordering {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_nulls_sort_last_in_both_directions() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = FilterRequest::new()
                .sort("postal_code", direction)
                .validate(FIELDS)
                .unwrap();
            let with_value = row("Madrid", Some("28001"), 1);
            let without = row("Madrid", None, 1);
            assert_eq!(query.compare_rows(&with_value, &without), Ordering::Less);
        }
    }

    #[test]
    fn test_descending_timestamps() {
        let query = FilterRequest::new().validate(FIELDS).unwrap();
        let mut older = row("A", None, 1);
        let mut newer = row("B", None, 1);
        older[8] = FieldValue::Timestamp(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        newer[8] = FieldValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(query.compare_rows(&newer, &older), Ordering::Less);
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_pages_covers_all_elements(total in 0u64..100_000, size in 1u32..=MAX_PAGE_SIZE) {
            let page: PaginationResponse<()> = PaginationResponse::new(vec![], total, 0, size);
            let capacity = u64::from(page.total_pages) * u64::from(size);
            prop_assert!(capacity >= total);
            prop_assert!(capacity < total + u64::from(size) || total == 0);
        }

        #[test]
        fn valid_page_sizes_are_accepted(page in 0u32..10_000, size in 1u32..=MAX_PAGE_SIZE) {
            let request = FilterRequest {
                filters: vec![],
                pagination: PaginationRequest { page_number: page, page_size: size, ..Default::default() },
            };
            let query = request.validate(FIELDS).unwrap();
            prop_assert_eq!(query.offset(), u64::from(page) * u64::from(size));
            prop_assert_eq!(query.limit(), u64::from(size));
        }

        #[test]
        fn equals_matches_exactly_the_same_text(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            let query = FilterRequest::new()
                .with(FilterCriterion::equals("city", a.clone()))
                .validate(FIELDS)
                .unwrap();
            prop_assert_eq!(query.matches(&row(&b, None, 1)), a == b);
        }
    }
}
