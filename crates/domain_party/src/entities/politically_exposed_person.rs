//! Politically exposed person (PEP) screening records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, PartyId, PoliticallyExposedPersonId};

use crate::codes::PepCategory;
use crate::entity::{child_metadata, merge_opt, merge_val, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

/// Outcome of a PEP screening for a party
///
/// `is_pep = false` records a negative screening; the remaining fields
/// describe the public function when the party is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticallyExposedPerson {
    pub id: PoliticallyExposedPersonId,
    pub party_id: PartyId,
    pub is_pep: bool,
    pub pep_category: Option<PepCategory>,
    pub public_function_title: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PoliticallyExposedPersonDto {
    pub id: Option<PoliticallyExposedPersonId>,
    pub party_id: Option<PartyId>,
    pub is_pep: Option<bool>,
    pub pep_category: Option<PepCategory>,
    #[validate(length(max = 200))]
    pub public_function_title: Option<String>,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PoliticallyExposedPerson {
    type Id = PoliticallyExposedPersonId;

    const LABEL: &'static str = "Politically exposed person";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("is_pep", FieldKind::Bool),
        FieldDef::new("pep_category", FieldKind::Text),
        FieldDef::new("public_function_title", FieldKind::Text),
        FieldDef::new("country", FieldKind::Text),
        FieldDef::new("start_date", FieldKind::Date),
        FieldDef::new("end_date", FieldKind::Date),
        FieldDef::new("notes", FieldKind::Text),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.is_pep.into(),
            self.pep_category.into(),
            self.public_function_title.clone().into(),
            self.country.clone().into(),
            self.start_date.into(),
            self.end_date.into(),
            self.notes.clone().into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for PoliticallyExposedPerson {
    type Dto = PoliticallyExposedPersonDto;

    fn to_dto(&self) -> PoliticallyExposedPersonDto {
        PoliticallyExposedPersonDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            is_pep: Some(self.is_pep),
            pep_category: self.pep_category,
            public_function_title: self.public_function_title.clone(),
            country: self.country.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: PoliticallyExposedPersonDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            is_pep: dto.is_pep.unwrap_or(false),
            pep_category: dto.pep_category,
            public_function_title: dto.public_function_title,
            country: dto.country,
            start_date: dto.start_date,
            end_date: dto.end_date,
            notes: dto.notes,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: PoliticallyExposedPersonDto) {
        merge_val(&mut self.is_pep, dto.is_pep);
        merge_opt(&mut self.pep_category, dto.pep_category);
        merge_opt(&mut self.public_function_title, dto.public_function_title);
        merge_opt(&mut self.country, dto.country);
        merge_opt(&mut self.start_date, dto.start_date);
        merge_opt(&mut self.end_date, dto.end_date);
        merge_opt(&mut self.notes, dto.notes);
    }

    fn dto_party_id(dto: &PoliticallyExposedPersonDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut PoliticallyExposedPersonDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
