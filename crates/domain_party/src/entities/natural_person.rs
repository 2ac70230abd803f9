//! Natural person, the specialisation of a party that is an individual

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, NaturalPersonId, PartyId};

use crate::codes::{Gender, MaritalStatus};
use crate::entity::{child_metadata, merge_opt, require_party, Entity, Mapper, Ownership};
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalPerson {
    pub id: NaturalPersonId,
    pub party_id: PartyId,
    pub title: Option<String>,
    pub given_name: String,
    pub middle_name: Option<String>,
    pub family_name: String,
    /// Second surname where naming conventions use two
    pub second_family_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    /// ISO 3166-1 alpha-2 code
    pub nationality_country: Option<String>,
    pub tax_id_number: Option<String>,
    pub profession: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NaturalPerson {
    /// Full name in display order
    pub fn full_name(&self) -> String {
        [
            Some(self.given_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.family_name.as_str()),
            self.second_family_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NaturalPersonDto {
    pub id: Option<NaturalPersonId>,
    pub party_id: Option<PartyId>,
    #[validate(length(max = 20))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub given_name: String,
    #[validate(length(max = 100))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub family_name: String,
    #[validate(length(max = 100))]
    pub second_family_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub birth_place: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    #[validate(length(equal = 2))]
    pub nationality_country: Option<String>,
    #[validate(length(max = 50))]
    pub tax_id_number: Option<String>,
    #[validate(length(max = 100))]
    pub profession: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for NaturalPerson {
    type Id = NaturalPersonId;

    const LABEL: &'static str = "Natural person";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("title", FieldKind::Text),
        FieldDef::new("given_name", FieldKind::Text),
        FieldDef::new("middle_name", FieldKind::Text),
        FieldDef::new("family_name", FieldKind::Text),
        FieldDef::new("second_family_name", FieldKind::Text),
        FieldDef::new("date_of_birth", FieldKind::Date),
        FieldDef::new("birth_place", FieldKind::Text),
        FieldDef::new("gender", FieldKind::Text),
        FieldDef::new("marital_status", FieldKind::Text),
        FieldDef::new("nationality_country", FieldKind::Text),
        FieldDef::new("tax_id_number", FieldKind::Text),
        FieldDef::new("profession", FieldKind::Text),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.title.clone().into(),
            self.given_name.clone().into(),
            self.middle_name.clone().into(),
            self.family_name.clone().into(),
            self.second_family_name.clone().into(),
            self.date_of_birth.into(),
            self.birth_place.clone().into(),
            self.gender.into(),
            self.marital_status.into(),
            self.nationality_country.clone().into(),
            self.tax_id_number.clone().into(),
            self.profession.clone().into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for NaturalPerson {
    type Dto = NaturalPersonDto;

    fn to_dto(&self) -> NaturalPersonDto {
        NaturalPersonDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            title: self.title.clone(),
            given_name: self.given_name.clone(),
            middle_name: self.middle_name.clone(),
            family_name: self.family_name.clone(),
            second_family_name: self.second_family_name.clone(),
            date_of_birth: self.date_of_birth,
            birth_place: self.birth_place.clone(),
            gender: self.gender,
            marital_status: self.marital_status,
            nationality_country: self.nationality_country.clone(),
            tax_id_number: self.tax_id_number.clone(),
            profession: self.profession.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: NaturalPersonDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            title: dto.title,
            given_name: dto.given_name,
            middle_name: dto.middle_name,
            family_name: dto.family_name,
            second_family_name: dto.second_family_name,
            date_of_birth: dto.date_of_birth,
            birth_place: dto.birth_place,
            gender: dto.gender,
            marital_status: dto.marital_status,
            nationality_country: dto.nationality_country,
            tax_id_number: dto.tax_id_number,
            profession: dto.profession,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: NaturalPersonDto) {
        self.given_name = dto.given_name;
        self.family_name = dto.family_name;
        merge_opt(&mut self.title, dto.title);
        merge_opt(&mut self.middle_name, dto.middle_name);
        merge_opt(&mut self.second_family_name, dto.second_family_name);
        merge_opt(&mut self.date_of_birth, dto.date_of_birth);
        merge_opt(&mut self.birth_place, dto.birth_place);
        merge_opt(&mut self.gender, dto.gender);
        merge_opt(&mut self.marital_status, dto.marital_status);
        merge_opt(&mut self.nationality_country, dto.nationality_country);
        merge_opt(&mut self.tax_id_number, dto.tax_id_number);
        merge_opt(&mut self.profession, dto.profession);
    }

    fn dto_party_id(dto: &NaturalPersonDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut NaturalPersonDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
