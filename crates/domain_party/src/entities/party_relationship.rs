//! Relationships between two parties

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId, PartyRelationshipId};

use crate::codes::RelationshipKind;
use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

/// A directed link from the owning party to another party
///
/// `relationship_kind` reads from the owner's perspective: a `PARENT`
/// relationship means the related party is the owner's parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRelationship {
    pub id: PartyRelationshipId,
    pub party_id: PartyId,
    pub related_party_id: PartyId,
    pub relationship_kind: RelationshipKind,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyRelationshipDto {
    pub id: Option<PartyRelationshipId>,
    pub party_id: Option<PartyId>,
    pub related_party_id: PartyId,
    pub relationship_kind: RelationshipKind,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PartyRelationship {
    type Id = PartyRelationshipId;

    const LABEL: &'static str = "Party relationship";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("related_party_id", FieldKind::Uuid),
        FieldDef::new("relationship_kind", FieldKind::Text),
        FieldDef::new("start_date", FieldKind::Date),
        FieldDef::new("end_date", FieldKind::Date),
        FieldDef::new("is_active", FieldKind::Bool),
        FieldDef::new("notes", FieldKind::Text),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.related_party_id.into(),
            self.relationship_kind.into(),
            self.start_date.into(),
            self.end_date.into(),
            self.is_active.into(),
            self.notes.clone().into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PartyRelationship {
    type Dto = PartyRelationshipDto;

    fn to_dto(&self) -> PartyRelationshipDto {
        PartyRelationshipDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            related_party_id: self.related_party_id,
            relationship_kind: self.relationship_kind,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: Some(self.is_active),
            notes: self.notes.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyRelationshipDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            related_party_id: dto.related_party_id,
            relationship_kind: dto.relationship_kind,
            start_date: dto.start_date,
            end_date: dto.end_date,
            is_active: dto.is_active.unwrap_or(true),
            notes: dto.notes,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyRelationshipDto) {
        self.related_party_id = dto.related_party_id;
        self.relationship_kind = dto.relationship_kind;
        merge_opt(&mut self.start_date, dto.start_date);
        merge_opt(&mut self.end_date, dto.end_date);
        merge_val(&mut self.is_active, dto.is_active);
        merge_opt(&mut self.notes, dto.notes);
    }

    fn dto_party_id(dto: &PartyRelationshipDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PartyRelationshipDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
