//! Economic activities (industry classification codes) of a party
//!
//! Exposed as a top-level collection, so the owning party always travels in
//! the body rather than the path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyEconomicActivityId, PartyId};

use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::entities::validate_amount;
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyEconomicActivity {
    pub id: PartyEconomicActivityId,
    pub party_id: PartyId,
    /// Classification code, e.g. NACE or CNAE
    pub activity_code: String,
    pub description: Option<String>,
    pub annual_turnover: Option<Decimal>,
    /// ISO 4217 code of `annual_turnover`
    pub currency_code: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyEconomicActivityDto {
    pub id: Option<PartyEconomicActivityId>,
    #[validate(required)]
    pub party_id: Option<PartyId>,
    #[validate(length(min = 1, max = 20))]
    pub activity_code: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    pub annual_turnover: Option<Decimal>,
    #[validate(length(equal = 3))]
    pub currency_code: Option<String>,
    pub is_primary: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PartyEconomicActivity {
    type Id = PartyEconomicActivityId;

    const LABEL: &'static str = "Party economic activity";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("activity_code", FieldKind::Text),
        FieldDef::new("description", FieldKind::Text),
        FieldDef::new("annual_turnover", FieldKind::Decimal),
        FieldDef::new("currency_code", FieldKind::Text),
        FieldDef::new("is_primary", FieldKind::Bool),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.activity_code.clone().into(),
            self.description.clone().into(),
            self.annual_turnover.into(),
            self.currency_code.clone().into(),
            self.is_primary.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PartyEconomicActivity {
    type Dto = PartyEconomicActivityDto;

    fn to_dto(&self) -> PartyEconomicActivityDto {
        PartyEconomicActivityDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            activity_code: self.activity_code.clone(),
            description: self.description.clone(),
            annual_turnover: self.annual_turnover,
            currency_code: self.currency_code.clone(),
            is_primary: Some(self.is_primary),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyEconomicActivityDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            activity_code: dto.activity_code,
            description: dto.description,
            annual_turnover: dto.annual_turnover,
            currency_code: dto.currency_code,
            is_primary: dto.is_primary.unwrap_or(false),
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyEconomicActivityDto) {
        self.activity_code = dto.activity_code;
        merge_opt(&mut self.description, dto.description);
        merge_opt(&mut self.annual_turnover, dto.annual_turnover);
        merge_opt(&mut self.currency_code, dto.currency_code);
        merge_val(&mut self.is_primary, dto.is_primary);
    }

    fn dto_party_id(dto: &PartyEconomicActivityDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PartyEconomicActivityDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
