//! Membership of a party in a customer group (household, corporate group)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyGroupMembershipId, PartyId};

use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyGroupMembership {
    pub id: PartyGroupMembershipId,
    pub party_id: PartyId,
    /// Identifier of the group; groups are managed outside this service
    pub group_id: Uuid,
    pub role_in_group: Option<String>,
    pub joined_at: Option<NaiveDate>,
    pub left_at: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyGroupMembershipDto {
    pub id: Option<PartyGroupMembershipId>,
    pub party_id: Option<PartyId>,
    pub group_id: Uuid,
    #[validate(length(max = 50))]
    pub role_in_group: Option<String>,
    pub joined_at: Option<NaiveDate>,
    pub left_at: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PartyGroupMembership {
    type Id = PartyGroupMembershipId;

    const LABEL: &'static str = "Party group membership";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("group_id", FieldKind::Uuid),
        FieldDef::new("role_in_group", FieldKind::Text),
        FieldDef::new("joined_at", FieldKind::Date),
        FieldDef::new("left_at", FieldKind::Date),
        FieldDef::new("is_active", FieldKind::Bool),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.group_id.into(),
            self.role_in_group.clone().into(),
            self.joined_at.into(),
            self.left_at.into(),
            self.is_active.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PartyGroupMembership {
    type Dto = PartyGroupMembershipDto;

    fn to_dto(&self) -> PartyGroupMembershipDto {
        PartyGroupMembershipDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            group_id: self.group_id,
            role_in_group: self.role_in_group.clone(),
            joined_at: self.joined_at,
            left_at: self.left_at,
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyGroupMembershipDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            group_id: dto.group_id,
            role_in_group: dto.role_in_group,
            joined_at: dto.joined_at,
            left_at: dto.left_at,
            is_active: dto.is_active.unwrap_or(true),
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyGroupMembershipDto) {
        self.group_id = dto.group_id;
        merge_opt(&mut self.role_in_group, dto.role_in_group);
        merge_opt(&mut self.joined_at, dto.joined_at);
        merge_opt(&mut self.left_at, dto.left_at);
        merge_val(&mut self.is_active, dto.is_active);
    }

    fn dto_party_id(dto: &PartyGroupMembershipDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PartyGroupMembershipDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
