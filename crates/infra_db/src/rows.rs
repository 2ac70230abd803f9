//! Row mapping for every stored entity
//!
//! Writes are generic: values come from [`Entity::field_values`] in schema
//! order. Reads are per entity, decoding each column by name.

use std::str::FromStr;

use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use domain_party::entities::*;
use domain_party::{Entity, UnknownCode};

/// An entity with a PostgreSQL table
pub trait PgEntity: Entity {
    const TABLE: &'static str;

    /// Decodes a row selected with the columns of [`Entity::FIELDS`]
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::ColumnDecode` when a column is missing, has an
    /// unexpected type or holds an unknown code
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}

fn decode_error(column: &str, error: UnknownCode) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

/// Reads a code column
fn code<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = UnknownCode>,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e| decode_error(column, e))
}

/// Reads a nullable code column
fn optional_code<T>(row: &PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr<Err = UnknownCode>,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| s.parse().map_err(|e| decode_error(column, e)))
        .transpose()
}

fn id<T: From<Uuid>>(row: &PgRow, column: &str) -> Result<T, sqlx::Error> {
    row.try_get::<Uuid, _>(column).map(T::from)
}

impl PgEntity for Party {
    const TABLE: &'static str = "parties";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_kind: code(row, "party_kind")?,
            tenant_id: row.try_get("tenant_id")?,
            preferred_language: row.try_get("preferred_language")?,
            source_system: row.try_get("source_system")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for NaturalPerson {
    const TABLE: &'static str = "natural_persons";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            title: row.try_get("title")?,
            given_name: row.try_get("given_name")?,
            middle_name: row.try_get("middle_name")?,
            family_name: row.try_get("family_name")?,
            second_family_name: row.try_get("second_family_name")?,
            date_of_birth: row.try_get("date_of_birth")?,
            birth_place: row.try_get("birth_place")?,
            gender: optional_code(row, "gender")?,
            marital_status: optional_code(row, "marital_status")?,
            nationality_country: row.try_get("nationality_country")?,
            tax_id_number: row.try_get("tax_id_number")?,
            profession: row.try_get("profession")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for LegalEntity {
    const TABLE: &'static str = "legal_entities";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            legal_name: row.try_get("legal_name")?,
            trade_name: row.try_get("trade_name")?,
            registration_number: row.try_get("registration_number")?,
            tax_id_number: row.try_get("tax_id_number")?,
            legal_form: row.try_get("legal_form")?,
            incorporation_date: row.try_get("incorporation_date")?,
            incorporation_country: row.try_get("incorporation_country")?,
            industry_description: row.try_get("industry_description")?,
            headcount: row.try_get("headcount")?,
            share_capital: row.try_get("share_capital")?,
            website_url: row.try_get("website_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for Address {
    const TABLE: &'static str = "addresses";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            address_kind: code(row, "address_kind")?,
            line1: row.try_get("line1")?,
            line2: row.try_get("line2")?,
            city: row.try_get("city")?,
            region: row.try_get("region")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
            is_primary: row.try_get("is_primary")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            valid_from: row.try_get("valid_from")?,
            valid_to: row.try_get("valid_to")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for EmailContact {
    const TABLE: &'static str = "email_contacts";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            email: row.try_get("email")?,
            email_kind: code(row, "email_kind")?,
            is_primary: row.try_get("is_primary")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PhoneContact {
    const TABLE: &'static str = "phone_contacts";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            phone_number: row.try_get("phone_number")?,
            phone_kind: code(row, "phone_kind")?,
            is_primary: row.try_get("is_primary")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for IdentityDocument {
    const TABLE: &'static str = "identity_documents";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            document_kind: code(row, "document_kind")?,
            document_number: row.try_get("document_number")?,
            issuing_country: row.try_get("issuing_country")?,
            issuing_authority: row.try_get("issuing_authority")?,
            issue_date: row.try_get("issue_date")?,
            expiry_date: row.try_get("expiry_date")?,
            is_validated: row.try_get("is_validated")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for Consent {
    const TABLE: &'static str = "consents";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            consent_kind: code(row, "consent_kind")?,
            consent_status: code(row, "consent_status")?,
            channel: row.try_get("channel")?,
            version: row.try_get("version")?,
            granted_at: row.try_get("granted_at")?,
            revoked_at: row.try_get("revoked_at")?,
            expires_at: row.try_get("expires_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PartyStatus {
    const TABLE: &'static str = "party_statuses";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            status_code: code(row, "status_code")?,
            reason: row.try_get("reason")?,
            valid_from: row.try_get("valid_from")?,
            valid_to: row.try_get("valid_to")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PartyRelationship {
    const TABLE: &'static str = "party_relationships";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            related_party_id: id(row, "related_party_id")?,
            relationship_kind: code(row, "relationship_kind")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            is_active: row.try_get("is_active")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PartyGroupMembership {
    const TABLE: &'static str = "party_group_memberships";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            group_id: row.try_get("group_id")?,
            role_in_group: row.try_get("role_in_group")?,
            joined_at: row.try_get("joined_at")?,
            left_at: row.try_get("left_at")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PartyEconomicActivity {
    const TABLE: &'static str = "party_economic_activities";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            activity_code: row.try_get("activity_code")?,
            description: row.try_get("description")?,
            annual_turnover: row.try_get("annual_turnover")?,
            currency_code: row.try_get("currency_code")?,
            is_primary: row.try_get("is_primary")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PartyProvider {
    const TABLE: &'static str = "party_providers";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            provider_name: row.try_get("provider_name")?,
            external_reference: row.try_get("external_reference")?,
            provider_status: code(row, "provider_status")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for PoliticallyExposedPerson {
    const TABLE: &'static str = "politically_exposed_persons";

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row, "id")?,
            party_id: id(row, "party_id")?,
            is_pep: row.try_get("is_pep")?,
            pep_category: optional_code(row, "pep_category")?,
            public_function_title: row.try_get("public_function_title")?,
            country: row.try_get("country")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Every table, children first, in an order safe for bulk deletes
pub const TABLES: &[&str] = &[
    NaturalPerson::TABLE,
    LegalEntity::TABLE,
    Address::TABLE,
    EmailContact::TABLE,
    PhoneContact::TABLE,
    IdentityDocument::TABLE,
    Consent::TABLE,
    PartyStatus::TABLE,
    PartyRelationship::TABLE,
    PartyGroupMembership::TABLE,
    PartyEconomicActivity::TABLE,
    PartyProvider::TABLE,
    PoliticallyExposedPerson::TABLE,
    Party::TABLE,
];
