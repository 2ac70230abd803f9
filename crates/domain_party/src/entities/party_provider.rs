//! External providers serving a party (brokers, data vendors, partners)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId, PartyProviderId};

use crate::codes::ProviderStatus;
use crate::entity::{child_metadata, merge_opt, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyProvider {
    pub id: PartyProviderId,
    pub party_id: PartyId,
    pub provider_name: String,
    /// The party's identifier in the provider's system
    pub external_reference: Option<String>,
    pub provider_status: ProviderStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PartyProviderDto {
    pub id: Option<PartyProviderId>,
    pub party_id: Option<PartyId>,
    #[validate(length(min = 1, max = 100))]
    pub provider_name: String,
    #[validate(length(max = 100))]
    pub external_reference: Option<String>,
    pub provider_status: ProviderStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PartyProvider {
    type Id = PartyProviderId;

    const LABEL: &'static str = "Party provider";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("provider_name", FieldKind::Text),
        FieldDef::new("external_reference", FieldKind::Text),
        FieldDef::new("provider_status", FieldKind::Text),
        FieldDef::new("start_date", FieldKind::Date),
        FieldDef::new("end_date", FieldKind::Date),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.provider_name.clone().into(),
            self.external_reference.clone().into(),
            self.provider_status.into(),
            self.start_date.into(),
            self.end_date.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PartyProvider {
    type Dto = PartyProviderDto;

    fn to_dto(&self) -> PartyProviderDto {
        PartyProviderDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            provider_name: self.provider_name.clone(),
            external_reference: self.external_reference.clone(),
            provider_status: self.provider_status,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PartyProviderDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            provider_name: dto.provider_name,
            external_reference: dto.external_reference,
            provider_status: dto.provider_status,
            start_date: dto.start_date,
            end_date: dto.end_date,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PartyProviderDto) {
        self.provider_name = dto.provider_name;
        self.provider_status = dto.provider_status;
        merge_opt(&mut self.external_reference, dto.external_reference);
        merge_opt(&mut self.start_date, dto.start_date);
        merge_opt(&mut self.end_date, dto.end_date);
    }

    fn dto_party_id(dto: &PartyProviderDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PartyProviderDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
