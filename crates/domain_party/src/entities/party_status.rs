//! Lifecycle status history of a party
//!
//! A party may accumulate several status rows over time; the most recently
//! created one is its current status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId, PartyStatusId};

use crate::codes::StatusCode;
use crate::entity::{child_metadata, merge_opt, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyStatus {
    pub id: PartyStatusId,
    pub party_id: PartyId,
    pub status_code: StatusCode,
    pub reason: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyStatusDto {
    pub id: Option<PartyStatusId>,
    pub party_id: Option<PartyId>,
    pub status_code: StatusCode,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PartyStatus {
    type Id = PartyStatusId;

    const LABEL: &'static str = "Party status";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("status_code", FieldKind::Text),
        FieldDef::new("reason", FieldKind::Text),
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
            self.status_code.into(),
            self.reason.clone().into(),
            self.valid_from.into(),
            self.valid_to.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PartyStatus {
    type Dto = PartyStatusDto;

    fn to_dto(&self) -> PartyStatusDto {
        PartyStatusDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            status_code: self.status_code,
            reason: self.reason.clone(),
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyStatusDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            status_code: dto.status_code,
            reason: dto.reason,
            valid_from: dto.valid_from,
            valid_to: dto.valid_to,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyStatusDto) {
        self.status_code = dto.status_code;
        merge_opt(&mut self.reason, dto.reason);
        merge_opt(&mut self.valid_from, dto.valid_from);
        merge_opt(&mut self.valid_to, dto.valid_to);
    }

    fn dto_party_id(dto: &PartyStatusDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PartyStatusDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
