use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// The literal is the canonical token everywhere: JSON payloads, stored
/// column text and report output all use the same string.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse::<$name>()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

str_enum!(Sex {
    Female => "F",
    Male => "M",
    Other => "O",
});

str_enum!(PhoneType {
    Mobile => "Celular",
    Residential => "Residencial",
});

str_enum!(AppointmentStatus {
    Scheduled => "Marcada",
    Absent => "Ausente",
    Cancelled => "Cancelada",
    Completed => "Realizada",
    Rescheduled => "Remarcada",
});

str_enum!(ReferralType {
    Exam => "Exame",
    Consultation => "Consulta",
    Both => "Ambos",
});

impl ReferralType {
    /// Whether this referral carries exam links.
    pub fn includes_exam(self) -> bool {
        matches!(self, Self::Exam | Self::Both)
    }

    /// Whether this referral carries a follow-up appointment link.
    pub fn includes_consultation(self) -> bool {
        matches!(self, Self::Consultation | Self::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Scheduled, "Marcada"),
            (AppointmentStatus::Absent, "Ausente"),
            (AppointmentStatus::Cancelled, "Cancelada"),
            (AppointmentStatus::Completed, "Realizada"),
            (AppointmentStatus::Rescheduled, "Remarcada"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn referral_type_round_trip() {
        for (variant, s) in [
            (ReferralType::Exam, "Exame"),
            (ReferralType::Consultation, "Consulta"),
            (ReferralType::Both, "Ambos"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ReferralType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn sex_and_phone_type_round_trip() {
        for (variant, s) in [(Sex::Female, "F"), (Sex::Male, "M"), (Sex::Other, "O")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Sex::from_str(s).unwrap(), variant);
        }
        for (variant, s) in [
            (PhoneType::Mobile, "Celular"),
            (PhoneType::Residential, "Residencial"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(PhoneType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn referral_type_composition() {
        assert!(ReferralType::Exam.includes_exam());
        assert!(!ReferralType::Exam.includes_consultation());
        assert!(ReferralType::Consultation.includes_consultation());
        assert!(!ReferralType::Consultation.includes_exam());
        assert!(ReferralType::Both.includes_exam());
        assert!(ReferralType::Both.includes_consultation());
    }

    #[test]
    fn serde_uses_stored_tokens() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Scheduled).unwrap(),
            "\"Marcada\""
        );
        let parsed: ReferralType = serde_json::from_str("\"Ambos\"").unwrap();
        assert_eq!(parsed, ReferralType::Both);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(AppointmentStatus::from_str("Pendente").is_err());
        assert!(ReferralType::from_str("").is_err());
        assert!(Sex::from_str("X").is_err());
    }
}
