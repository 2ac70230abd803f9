//! Party, the root of every customer record
//!
//! A party is specialised by exactly one natural person or legal entity
//! record, identified by [`PartyKind`]. All other records hang off a party.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId};

use crate::codes::PartyKind;
use crate::entity::{merge_opt, Entity, Mapper, Ownership};
use crate::error::PartyError;

/// A customer of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub party_kind: PartyKind,
    /// Tenant that owns the record in a multi-tenant deployment
    pub tenant_id: Option<String>,
    /// Preferred language as a BCP 47 tag
    pub preferred_language: Option<String>,
    /// System the record was originally captured in
    pub source_system: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyDto {
    pub id: Option<PartyId>,
    pub party_kind: PartyKind,
    #[validate(length(min = 1, max = 64))]
    pub tenant_id: Option<String>,
    #[validate(length(min = 2, max = 35))]
    pub preferred_language: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub source_system: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Party {
    type Id = PartyId;

    const LABEL: &'static str = "Party";
    const OWNERSHIP: Ownership = Ownership::Root;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_kind", FieldKind::Text),
        FieldDef::new("tenant_id", FieldKind::Text),
        FieldDef::new("preferred_language", FieldKind::Text),
        FieldDef::new("source_system", FieldKind::Text),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> PartyId {
        self.id
    }

    fn party_id(&self) -> Option<PartyId> {
        None
    }

    fn set_party_id(&mut self, _party_id: PartyId) {}

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn init_metadata(&mut self, id: PartyId, now: DateTime<Utc>) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_kind.into(),
            self.tenant_id.clone().into(),
            self.preferred_language.clone().into(),
            self.source_system.clone().into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for Party {
    type Dto = PartyDto;

    fn to_dto(&self) -> PartyDto {
        PartyDto {
            id: Some(self.id),
            party_kind: self.party_kind,
            tenant_id: self.tenant_id.clone(),
            preferred_language: self.preferred_language.clone(),
            source_system: self.source_system.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_kind: dto.party_kind,
            tenant_id: dto.tenant_id,
            preferred_language: dto.preferred_language,
            source_system: dto.source_system,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyDto) {
        self.party_kind = dto.party_kind;
        merge_opt(&mut self.tenant_id, dto.tenant_id);
        merge_opt(&mut self.preferred_language, dto.preferred_language);
        merge_opt(&mut self.source_system, dto.source_system);
    }

    fn dto_party_id(_dto: &PartyDto) -> Option<PartyId> {
        None
    }

    fn assign_party(_dto: &mut PartyDto, _party_id: PartyId) {}
}
