//! Identity documents presented by a party

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, IdentityDocumentId, PartyId};

use crate::codes::DocumentKind;
use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub id: IdentityDocumentId,
    pub party_id: PartyId,
    pub document_kind: DocumentKind,
    pub document_number: String,
    pub issuing_country: Option<String>,
    pub issuing_authority: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    /// Whether the document was checked against its original
    pub is_validated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IdentityDocumentDto {
    pub id: Option<IdentityDocumentId>,
    pub party_id: Option<PartyId>,
    pub document_kind: DocumentKind,
    #[validate(length(min = 1, max = 50))]
    pub document_number: String,
    #[validate(length(equal = 2))]
    pub issuing_country: Option<String>,
    #[validate(length(max = 100))]
    pub issuing_authority: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub is_validated: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for IdentityDocument {
    type Id = IdentityDocumentId;

    const LABEL: &'static str = "Identity document";
    const OWNERSHIP: Ownership = Ownership::Unchecked;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("document_kind", FieldKind::Text),
        FieldDef::new("document_number", FieldKind::Text),
        FieldDef::new("issuing_country", FieldKind::Text),
        FieldDef::new("issuing_authority", FieldKind::Text),
        FieldDef::new("issue_date", FieldKind::Date),
        FieldDef::new("expiry_date", FieldKind::Date),
        FieldDef::new("is_validated", FieldKind::Bool),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.document_kind.into(),
            self.document_number.clone().into(),
            self.issuing_country.clone().into(),
            self.issuing_authority.clone().into(),
            self.issue_date.into(),
            self.expiry_date.into(),
            self.is_validated.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for IdentityDocument {
    type Dto = IdentityDocumentDto;

    fn to_dto(&self) -> IdentityDocumentDto {
        IdentityDocumentDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            document_kind: self.document_kind,
            document_number: self.document_number.clone(),
            issuing_country: self.issuing_country.clone(),
            issuing_authority: self.issuing_authority.clone(),
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            is_validated: Some(self.is_validated),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: IdentityDocumentDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            document_kind: dto.document_kind,
            document_number: dto.document_number,
            issuing_country: dto.issuing_country,
            issuing_authority: dto.issuing_authority,
            issue_date: dto.issue_date,
            expiry_date: dto.expiry_date,
            is_validated: dto.is_validated.unwrap_or(false),
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: IdentityDocumentDto) {
        self.document_kind = dto.document_kind;
        self.document_number = dto.document_number;
        merge_opt(&mut self.issuing_country, dto.issuing_country);
        merge_opt(&mut self.issuing_authority, dto.issuing_authority);
        merge_opt(&mut self.issue_date, dto.issue_date);
        merge_opt(&mut self.expiry_date, dto.expiry_date);
        merge_val(&mut self.is_validated, dto.is_validated);
    }

    fn dto_party_id(dto: &IdentityDocumentDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut IdentityDocumentDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
