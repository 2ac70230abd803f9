//! Postal addresses

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{AddressId, FieldDef, FieldKind, FieldValue, PartyId};

use crate::codes::AddressKind;
use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::entities::{validate_latitude, validate_longitude};
use crate::error::PartyError;

/// A postal address of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub party_id: PartyId,
    pub address_kind: AddressKind,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    /// State, province or county
    pub region: Option<String>,
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 code
    pub country: String,
    /// Whether this is the party's preferred address
    pub is_primary: bool,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Whether the address is valid on the given date
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from.map_or(true, |from| from <= date)
            && self.valid_to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressDto {
    pub id: Option<AddressId>,
    pub party_id: Option<PartyId>,
    pub address_kind: AddressKind,
    #[validate(length(min = 1, max = 255))]
    pub line1: String,
    #[validate(length(max = 255))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(equal = 2))]
    pub country: String,
    pub is_primary: Option<bool>,
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Option<Decimal>,
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Option<Decimal>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Address {
    type Id = AddressId;

    const LABEL: &'static str = "Address";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("address_kind", FieldKind::Text),
        FieldDef::new("line1", FieldKind::Text),
        FieldDef::new("line2", FieldKind::Text),
        FieldDef::new("city", FieldKind::Text),
        FieldDef::new("region", FieldKind::Text),
        FieldDef::new("postal_code", FieldKind::Text),
        FieldDef::new("country", FieldKind::Text),
        FieldDef::new("is_primary", FieldKind::Bool),
        FieldDef::new("latitude", FieldKind::Decimal),
        FieldDef::new("longitude", FieldKind::Decimal),
        FieldDef::new("valid_from", FieldKind::Date),
        FieldDef::new("valid_to", FieldKind::Date),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.address_kind.into(),
            self.line1.clone().into(),
            self.line2.clone().into(),
            self.city.clone().into(),
            self.region.clone().into(),
            self.postal_code.clone().into(),
            self.country.clone().into(),
            self.is_primary.into(),
            self.latitude.into(),
            self.longitude.into(),
            self.valid_from.into(),
            self.valid_to.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for Address {
    type Dto = AddressDto;

    fn to_dto(&self) -> AddressDto {
        AddressDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            address_kind: self.address_kind,
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            city: self.city.clone(),
            region: self.region.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            is_primary: Some(self.is_primary),
            latitude: self.latitude,
            longitude: self.longitude,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: AddressDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            address_kind: dto.address_kind,
            line1: dto.line1,
            line2: dto.line2,
            city: dto.city,
            region: dto.region,
            postal_code: dto.postal_code,
            country: dto.country,
            is_primary: dto.is_primary.unwrap_or(false),
            latitude: dto.latitude,
            longitude: dto.longitude,
            valid_from: dto.valid_from,
            valid_to: dto.valid_to,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: AddressDto) {
        self.address_kind = dto.address_kind;
        self.line1 = dto.line1;
        self.city = dto.city;
        self.country = dto.country;
        merge_opt(&mut self.line2, dto.line2);
        merge_opt(&mut self.region, dto.region);
        merge_opt(&mut self.postal_code, dto.postal_code);
        merge_val(&mut self.is_primary, dto.is_primary);
        merge_opt(&mut self.latitude, dto.latitude);
        merge_opt(&mut self.longitude, dto.longitude);
        merge_opt(&mut self.valid_from, dto.valid_from);
        merge_opt(&mut self.valid_to, dto.valid_to);
    }

    fn dto_party_id(dto: &AddressDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut AddressDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
