//! Telephone contact points

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId, PhoneContactId};

use crate::codes::PhoneKind;
use crate::entity::{child_metadata, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneContact {
    pub id: PhoneContactId,
    pub party_id: PartyId,
    /// Number in E.164 or national format
    pub phone_number: String,
    pub phone_kind: PhoneKind,
    pub is_primary: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PhoneContactDto {
    pub id: Option<PhoneContactId>,
    pub party_id: Option<PartyId>,
    #[validate(length(min = 3, max = 30))]
    pub phone_number: String,
    pub phone_kind: PhoneKind,
    pub is_primary: Option<bool>,
    pub is_verified: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PhoneContact {
    type Id = PhoneContactId;

    const LABEL: &'static str = "Phone contact";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("phone_number", FieldKind::Text),
        FieldDef::new("phone_kind", FieldKind::Text),
        FieldDef::new("is_primary", FieldKind::Bool),
        FieldDef::new("is_verified", FieldKind::Bool),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.phone_number.clone().into(),
            self.phone_kind.into(),
            self.is_primary.into(),
            self.is_verified.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PhoneContact {
    type Dto = PhoneContactDto;

    fn to_dto(&self) -> PhoneContactDto {
        PhoneContactDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            phone_number: self.phone_number.clone(),
            phone_kind: self.phone_kind,
            is_primary: Some(self.is_primary),
            is_verified: Some(self.is_verified),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PhoneContactDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            phone_number: dto.phone_number,
            phone_kind: dto.phone_kind,
            is_primary: dto.is_primary.unwrap_or(false),
            is_verified: dto.is_verified.unwrap_or(false),
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PhoneContactDto) {
        self.phone_number = dto.phone_number;
        self.phone_kind = dto.phone_kind;
        merge_val(&mut self.is_primary, dto.is_primary);
        merge_val(&mut self.is_verified, dto.is_verified);
    }

    fn dto_party_id(dto: &PhoneContactDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PhoneContactDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
