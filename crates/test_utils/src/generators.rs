//! Property-Based Test Generators
//!
//! Proptest strategies producing values that respect the entity schemas:
//! code lists, ISO country codes and valid addresses.

use chrono::NaiveDate;
use proptest::prelude::*;
use proptest::sample::select;
use rust_decimal::Decimal;

use core_kernel::{FilterOperator, PartyId, SortDirection};
use domain_party::entities::AddressDto;
use domain_party::{AddressKind, StatusCode};

/// Strategy for address kinds
pub fn address_kind_strategy() -> impl Strategy<Value = AddressKind> {
    select(AddressKind::ALL)
}

/// Strategy for party status codes
pub fn status_code_strategy() -> impl Strategy<Value = StatusCode> {
    select(StatusCode::ALL)
}

/// Strategy for ISO 3166-1 alpha-2 country codes
pub fn country_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

/// Strategy for dates between 1950 and 2049
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2050, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

/// Strategy for latitudes with six decimal places
pub fn latitude_strategy() -> impl Strategy<Value = Decimal> {
    (-90_000_000i64..=90_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

/// Strategy for operators that compare against a single value
pub fn comparison_operator_strategy() -> impl Strategy<Value = FilterOperator> {
    select(vec![
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterThanOrEqual,
        FilterOperator::LessThan,
        FilterOperator::LessThanOrEqual,
    ])
}

pub fn sort_direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

/// Strategy for address DTOs that pass validation
pub fn address_dto_strategy(party_id: PartyId) -> impl Strategy<Value = AddressDto> {
    (
        address_kind_strategy(),
        "[A-Za-z0-9 ]{1,60}",
        "[A-Za-z ]{1,40}",
        country_code_strategy(),
        any::<bool>(),
        proptest::option::of(latitude_strategy()),
        proptest::option::of(date_strategy()),
    )
        .prop_map(move |(kind, line1, city, country, primary, latitude, valid_from)| AddressDto {
            id: None,
            party_id: Some(party_id),
            address_kind: kind,
            line1,
            line2: None,
            city,
            region: None,
            postal_code: None,
            country,
            is_primary: Some(primary),
            latitude,
            longitude: None,
            valid_from,
            valid_to: None,
            created_at: None,
            updated_at: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    proptest! {
        #[test]
        fn generated_addresses_are_valid(dto in address_dto_strategy(PartyId::new())) {
            prop_assert!(dto.validate().is_ok());
        }

        #[test]
        fn generated_latitudes_are_in_range(latitude in latitude_strategy()) {
            prop_assert!(latitude >= Decimal::from(-90) && latitude <= Decimal::from(90));
        }
    }
}
