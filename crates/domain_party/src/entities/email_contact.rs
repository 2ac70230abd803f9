//! Email contact points

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{EmailContactId, FieldDef, FieldKind, FieldValue, PartyId};

use crate::codes::EmailKind;
use crate::entity::{child_metadata, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailContact {
    pub id: EmailContactId,
    pub party_id: PartyId,
    pub email: String,
    pub email_kind: EmailKind,
    pub is_primary: bool,
    /// Whether ownership of the mailbox has been confirmed
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmailContactDto {
    pub id: Option<EmailContactId>,
    pub party_id: Option<PartyId>,
    #[validate(email)]
    pub email: String,
    pub email_kind: EmailKind,
    pub is_primary: Option<bool>,
    pub is_verified: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for EmailContact {
    type Id = EmailContactId;

    const LABEL: &'static str = "Email contact";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("email", FieldKind::Text),
        FieldDef::new("email_kind", FieldKind::Text),
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
            self.email.clone().into(),
            self.email_kind.into(),
            self.is_primary.into(),
            self.is_verified.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for EmailContact {
    type Dto = EmailContactDto;

    fn to_dto(&self) -> EmailContactDto {
        EmailContactDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            email: self.email.clone(),
            email_kind: self.email_kind,
            is_primary: Some(self.is_primary),
            is_verified: Some(self.is_verified),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: EmailContactDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            email: dto.email,
            email_kind: dto.email_kind,
            is_primary: dto.is_primary.unwrap_or(false),
            is_verified: dto.is_verified.unwrap_or(false),
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: EmailContactDto) {
        self.email = dto.email;
        self.email_kind = dto.email_kind;
        merge_val(&mut self.is_primary, dto.is_primary);
        merge_val(&mut self.is_verified, dto.is_verified);
    }

    fn dto_party_id(dto: &EmailContactDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut EmailContactDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
