//! Code lists
//!
//! Classification columns (kinds, statuses, categories) are stored as text
//! codes. Each list is a closed enum that serializes to its upper snake case
//! code, so JSON payloads, filter operands and table columns agree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::FieldValue;

/// A stored code that does not belong to its list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {list} code '{code}'")]
pub struct UnknownCode {
    pub list: &'static str,
    pub code: String,
}

macro_rules! define_code {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every code in the list, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(UnknownCode {
                        list: stringify!($name),
                        code: s.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for FieldValue {
            fn from(code: $name) -> Self {
                FieldValue::Text(code.as_str().to_string())
            }
        }
    };
}

define_code!(
    /// Specialization of a party
    PartyKind {
        NaturalPerson => "NATURAL_PERSON",
        LegalEntity => "LEGAL_ENTITY",
    }
);

define_code!(
    Gender {
        Male => "MALE",
        Female => "FEMALE",
        Other => "OTHER",
        Undisclosed => "UNDISCLOSED",
    }
);

define_code!(
    MaritalStatus {
        Single => "SINGLE",
        Married => "MARRIED",
        Divorced => "DIVORCED",
        Widowed => "WIDOWED",
        Separated => "SEPARATED",
        DomesticPartnership => "DOMESTIC_PARTNERSHIP",
    }
);

define_code!(
    AddressKind {
        Home => "HOME",
        Work => "WORK",
        Billing => "BILLING",
        Shipping => "SHIPPING",
        Legal => "LEGAL",
        Other => "OTHER",
    }
);

define_code!(
    EmailKind {
        Personal => "PERSONAL",
        Work => "WORK",
        Other => "OTHER",
    }
);

define_code!(
    PhoneKind {
        Mobile => "MOBILE",
        Home => "HOME",
        Work => "WORK",
        Fax => "FAX",
        Other => "OTHER",
    }
);

define_code!(
    DocumentKind {
        Passport => "PASSPORT",
        NationalId => "NATIONAL_ID",
        DrivingLicense => "DRIVING_LICENSE",
        ResidencePermit => "RESIDENCE_PERMIT",
        TaxId => "TAX_ID",
        Other => "OTHER",
    }
);

define_code!(
    ConsentKind {
        Marketing => "MARKETING",
        DataProcessing => "DATA_PROCESSING",
        ThirdPartySharing => "THIRD_PARTY_SHARING",
        Profiling => "PROFILING",
        TermsAndConditions => "TERMS_AND_CONDITIONS",
    }
);

define_code!(
    ConsentStatus {
        Granted => "GRANTED",
        Revoked => "REVOKED",
        Pending => "PENDING",
        Expired => "EXPIRED",
    }
);

define_code!(
    /// Lifecycle status of a party
    StatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Prospect => "PROSPECT",
        Blocked => "BLOCKED",
        Deceased => "DECEASED",
        Closed => "CLOSED",
    }
);

define_code!(
    RelationshipKind {
        Spouse => "SPOUSE",
        Parent => "PARENT",
        Child => "CHILD",
        Guardian => "GUARDIAN",
        Employer => "EMPLOYER",
        Employee => "EMPLOYEE",
        Shareholder => "SHAREHOLDER",
        Director => "DIRECTOR",
        BeneficialOwner => "BENEFICIAL_OWNER",
        LegalRepresentative => "LEGAL_REPRESENTATIVE",
        Other => "OTHER",
    }
);

define_code!(
    ProviderStatus {
        Active => "ACTIVE",
        Suspended => "SUSPENDED",
        Terminated => "TERMINATED",
    }
);

define_code!(
    /// Reason a person is considered politically exposed
    PepCategory {
        HeadOfState => "HEAD_OF_STATE",
        GovernmentOfficial => "GOVERNMENT_OFFICIAL",
        JudicialOfficial => "JUDICIAL_OFFICIAL",
        MilitaryOfficial => "MILITARY_OFFICIAL",
        StateEnterpriseExecutive => "STATE_ENTERPRISE_EXECUTIVE",
        PoliticalPartyOfficial => "POLITICAL_PARTY_OFFICIAL",
        InternationalOrganizationOfficial => "INTERNATIONAL_ORGANIZATION_OFFICIAL",
        FamilyMember => "FAMILY_MEMBER",
        CloseAssociate => "CLOSE_ASSOCIATE",
    }
);
