//! Strongly-typed identifiers for party master data entities
//!
//! Every entity is keyed by a UUID. Wrapping each key in its own newtype
//! keeps a `PartyId` from being passed where an `AddressId` is expected,
//! while serializing as a bare UUID string on the wire and in storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::filter::FieldValue;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl From<$name> for FieldValue {
            fn from(id: $name) -> FieldValue {
                FieldValue::Uuid(id.0)
            }
        }
    };
}

// Root entity
define_id!(PartyId, "PTY");

// Party specializations
define_id!(NaturalPersonId, "NPER");
define_id!(LegalEntityId, "LENT");

// Contact data
define_id!(AddressId, "ADDR");
define_id!(EmailContactId, "EML");
define_id!(PhoneContactId, "PHN");

// Compliance
define_id!(IdentityDocumentId, "IDOC");
define_id!(ConsentId, "CNS");
define_id!(PoliticallyExposedPersonId, "PEP");

// Lifecycle and structure
define_id!(PartyStatusId, "PST");
define_id!(PartyRelationshipId, "PREL");
define_id!(PartyGroupMembershipId, "PGM");
define_id!(PartyEconomicActivityId, "PEA");
define_id!(PartyProviderId, "PPRV");
