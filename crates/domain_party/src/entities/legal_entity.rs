//! Legal entity, the specialisation of a party that is an organisation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldDef, FieldKind, FieldValue, LegalEntityId, PartyId};

use crate::entity::{child_metadata, merge_opt, require_party, Entity, Mapper, Ownership};
use crate::entities::validate_amount;
use crate::error::PartyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalEntity {
    pub id: LegalEntityId,
    pub party_id: PartyId,
    pub legal_name: String,
    pub trade_name: Option<String>,
    /// Number in the commercial register
    pub registration_number: Option<String>,
    pub tax_id_number: Option<String>,
    /// Legal form code such as LLC or SA
    pub legal_form: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    pub incorporation_country: Option<String>,
    pub industry_description: Option<String>,
    pub headcount: Option<i32>,
    pub share_capital: Option<Decimal>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LegalEntityDto {
    pub id: Option<LegalEntityId>,
    pub party_id: Option<PartyId>,
    #[validate(length(min = 1, max = 200))]
    pub legal_name: String,
    #[validate(length(max = 200))]
    pub trade_name: Option<String>,
    #[validate(length(max = 50))]
    pub registration_number: Option<String>,
    #[validate(length(max = 50))]
    pub tax_id_number: Option<String>,
    #[validate(length(max = 50))]
    pub legal_form: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    #[validate(length(equal = 2))]
    pub incorporation_country: Option<String>,
    #[validate(length(max = 255))]
    pub industry_description: Option<String>,
    #[validate(range(min = 0))]
    pub headcount: Option<i32>,
    #[validate(custom(function = "validate_amount"))]
    pub share_capital: Option<Decimal>,
    #[validate(url)]
    pub website_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for LegalEntity {
    type Id = LegalEntityId;

    const LABEL: &'static str = "Legal entity";
    const OWNERSHIP: Ownership = Ownership::Enforced;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::Uuid),
        FieldDef::new("party_id", FieldKind::Uuid),
        FieldDef::new("legal_name", FieldKind::Text),
        FieldDef::new("trade_name", FieldKind::Text),
        FieldDef::new("registration_number", FieldKind::Text),
        FieldDef::new("tax_id_number", FieldKind::Text),
        FieldDef::new("legal_form", FieldKind::Text),
        FieldDef::new("incorporation_date", FieldKind::Date),
        FieldDef::new("incorporation_country", FieldKind::Text),
        FieldDef::new("industry_description", FieldKind::Text),
        FieldDef::new("headcount", FieldKind::Integer),
        FieldDef::new("share_capital", FieldKind::Decimal),
        FieldDef::new("website_url", FieldKind::Text),
        FieldDef::new("created_at", FieldKind::Timestamp),
        FieldDef::new("updated_at", FieldKind::Timestamp),
    ];

    child_metadata!();

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.party_id.into(),
            self.legal_name.clone().into(),
            self.trade_name.clone().into(),
            self.registration_number.clone().into(),
            self.tax_id_number.clone().into(),
            self.legal_form.clone().into(),
            self.incorporation_date.into(),
            self.incorporation_country.clone().into(),
            self.industry_description.clone().into(),
            self.headcount.into(),
            self.share_capital.into(),
            self.website_url.clone().into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl Mapper for LegalEntity {
    type Dto = LegalEntityDto;

    fn to_dto(&self) -> LegalEntityDto {
        LegalEntityDto {
            id: Some(self.id),
            party_id: Some(self.party_id),
            legal_name: self.legal_name.clone(),
            trade_name: self.trade_name.clone(),
            registration_number: self.registration_number.clone(),
            tax_id_number: self.tax_id_number.clone(),
            legal_form: self.legal_form.clone(),
            incorporation_date: self.incorporation_date,
            incorporation_country: self.incorporation_country.clone(),
            industry_description: self.industry_description.clone(),
            headcount: self.headcount,
            share_capital: self.share_capital,
            website_url: self.website_url.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn to_entity(dto: LegalEntityDto) -> Result<Self, PartyError> {
        let now = Utc::now();
        Ok(Self {
            id: dto.id.unwrap_or_else(Self::new_id),
            party_id: require_party(dto.party_id)?,
            legal_name: dto.legal_name,
            trade_name: dto.trade_name,
            registration_number: dto.registration_number,
            tax_id_number: dto.tax_id_number,
            legal_form: dto.legal_form,
            incorporation_date: dto.incorporation_date,
            incorporation_country: dto.incorporation_country,
            industry_description: dto.industry_description,
            headcount: dto.headcount,
            share_capital: dto.share_capital,
            website_url: dto.website_url,
            created_at: dto.created_at.unwrap_or(now),
            updated_at: dto.updated_at.unwrap_or(now),
        })
    }

    fn merge(&mut self, dto: LegalEntityDto) {
        self.legal_name = dto.legal_name;
        merge_opt(&mut self.trade_name, dto.trade_name);
        merge_opt(&mut self.registration_number, dto.registration_number);
        merge_opt(&mut self.tax_id_number, dto.tax_id_number);
        merge_opt(&mut self.legal_form, dto.legal_form);
        merge_opt(&mut self.incorporation_date, dto.incorporation_date);
        merge_opt(&mut self.incorporation_country, dto.incorporation_country);
        merge_opt(&mut self.industry_description, dto.industry_description);
        merge_opt(&mut self.headcount, dto.headcount);
        merge_opt(&mut self.share_capital, dto.share_capital);
        merge_opt(&mut self.website_url, dto.website_url);
    }

    fn dto_party_id(dto: &LegalEntityDto) -> Option<PartyId> {
        dto.party_id
    }

    fn assign_party(dto: &mut LegalEntityDto, party_id: PartyId) {
        dto.party_id = Some(party_id);
    }
}
