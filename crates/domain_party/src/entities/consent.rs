//! Data protection consents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ConsentId, FieldDef, FieldKind, FieldValue, PartyId};

use crate::codes::{ConsentKind, ConsentStatus};
use crate::entity::{child_metadata, merge_opt, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

/// A consent given (or withheld) by a party for one processing purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    pub id: ConsentId,
    pub party_id: PartyId,
    pub consent_kind: ConsentKind,
    pub consent_status: ConsentStatus,
    /// Channel the consent was captured through (web, branch, call centre)
    pub channel: Option<String>,
    /// Version of the legal text the party agreed to
    pub version: Option<String>,
    pub granted_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Consent {
    /// Whether the consent currently authorises processing
    pub fn is_effective_at(&self, at: DateTime<Utc>) -> bool {
        self.consent_status == ConsentStatus::Granted
            && self.expires_at.map_or(true, |expiry| at < expiry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConsentDto {
    pub id: Option<ConsentId>,
    pub party_id: Option<PartyId>,
    pub consent_kind: ConsentKind,
    pub consent_status: ConsentStatus,
    #[validate(length(max = 50))]
    pub channel: Option<String>,
    #[validate(length(max = 20))]
    pub version: Option<String>,
    pub granted_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Consent {
    type Id = ConsentId;

    const LABEL: &'static str = "Consent";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("consent_kind", FieldKind::Text),
        FieldDef::new("consent_status", FieldKind::Text),
        FieldDef::new("channel", FieldKind::Text),
        FieldDef::new("version", FieldKind::Text),
        FieldDef::new("granted_at", FieldKind::Timestamp),
        FieldDef::new("revoked_at", FieldKind::Timestamp),
        FieldDef::new("expires_at", FieldKind::Timestamp),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.consent_kind.into(),
            self.consent_status.into(),
            self.channel.clone().into(),
            self.version.clone().into(),
            self.granted_at.into(),
            self.revoked_at.into(),
            self.expires_at.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for Consent {
    type Dto = ConsentDto;

    fn to_dto(&self) -> ConsentDto {
        ConsentDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            consent_kind: self.consent_kind,
            consent_status: self.consent_status,
            channel: self.channel.clone(),
            version: self.version.clone(),
            granted_at: self.granted_at,
            revoked_at: self.revoked_at,
            expires_at: self.expires_at,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: ConsentDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            consent_kind: dto.consent_kind,
            consent_status: dto.consent_status,
            channel: dto.channel,
            version: dto.version,
            granted_at: dto.granted_at,
            revoked_at: dto.revoked_at,
            expires_at: dto.expires_at,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: ConsentDto) {
        self.consent_kind = dto.consent_kind;
        self.consent_status = dto.consent_status;
        merge_opt(&mut self.channel, dto.channel);
        merge_opt(&mut self.version, dto.version);
        merge_opt(&mut self.granted_at, dto.granted_at);
        merge_opt(&mut self.revoked_at, dto.revoked_at);
        merge_opt(&mut self.expires_at, dto.expires_at);
    }

    fn dto_party_id(dto: &ConsentDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut ConsentDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
