use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::input;

/// The scalar dashboard fields a user can edit directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    TargetAmount,
    CurrentHearts,
    PricePerUnit,
    HeartsPerTrip,
    InvestmentPerTrip,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::TargetAmount,
        Field::CurrentHearts,
        Field::PricePerUnit,
        Field::HeartsPerTrip,
        Field::InvestmentPerTrip,
    ];

    /// The persisted (camelCase) key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::TargetAmount => "targetAmount",
            Field::CurrentHearts => "currentHearts",
            Field::PricePerUnit => "pricePerUnit",
            Field::HeartsPerTrip => "heartsPerTrip",
            Field::InvestmentPerTrip => "investmentPerTrip",
        }
    }

    /// Pair this field with an already-sanitized value.
    pub fn with(self, value: u64) -> FieldUpdate {
        match self {
            Field::TargetAmount => FieldUpdate::TargetAmount(value),
            Field::CurrentHearts => FieldUpdate::CurrentHearts(value),
            Field::PricePerUnit => FieldUpdate::PricePerUnit(value),
            Field::HeartsPerTrip => FieldUpdate::HeartsPerTrip(value),
            Field::InvestmentPerTrip => FieldUpdate::InvestmentPerTrip(value),
        }
    }

    /// Pair this field with raw numeric input, coercing invalid values to 0.
    pub fn with_raw(self, value: f64) -> FieldUpdate {
        self.with(input::sanitize_amount(value))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// A single scalar field edit. One variant per editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    TargetAmount(u64),
    CurrentHearts(u64),
    PricePerUnit(u64),
    HeartsPerTrip(u64),
    InvestmentPerTrip(u64),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::TargetAmount(_) => Field::TargetAmount,
            FieldUpdate::CurrentHearts(_) => Field::CurrentHearts,
            FieldUpdate::PricePerUnit(_) => Field::PricePerUnit,
            FieldUpdate::HeartsPerTrip(_) => Field::HeartsPerTrip,
            FieldUpdate::InvestmentPerTrip(_) => Field::InvestmentPerTrip,
        }
    }

    pub fn value(&self) -> u64 {
        match *self {
            FieldUpdate::TargetAmount(v)
            | FieldUpdate::CurrentHearts(v)
            | FieldUpdate::PricePerUnit(v)
            | FieldUpdate::HeartsPerTrip(v)
            | FieldUpdate::InvestmentPerTrip(v) => v,
        }
    }
}
