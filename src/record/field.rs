use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LaundryError;

/// The seven value fields a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordField {
    Coin,
    Hopper,
    Soap,
    Vending,
    DropOffAmount1,
    DropOffCode,
    DropOffAmount2,
}

impl RecordField {
    /// Every field, in form and column order.
    pub const ALL: [RecordField; 7] = [
        RecordField::Coin,
        RecordField::Hopper,
        RecordField::Soap,
        RecordField::Vending,
        RecordField::DropOffAmount1,
        RecordField::DropOffCode,
        RecordField::DropOffAmount2,
    ];

    /// Column label, identical to the key used in the stored rows.
    pub fn label(self) -> &'static str {
        match self {
            RecordField::Coin => "Coin",
            RecordField::Hopper => "Hopper",
            RecordField::Soap => "Soap",
            RecordField::Vending => "Vending",
            RecordField::DropOffAmount1 => "Drop Off Amount 1",
            RecordField::DropOffCode => "Drop Off Code",
            RecordField::DropOffAmount2 => "Drop Off Amount 2",
        }
    }

    /// Short name accepted by the shell.
    pub fn short_name(self) -> &'static str {
        match self {
            RecordField::Coin => "coin",
            RecordField::Hopper => "hopper",
            RecordField::Soap => "soap",
            RecordField::Vending => "vending",
            RecordField::DropOffAmount1 => "drop1",
            RecordField::DropOffCode => "code",
            RecordField::DropOffAmount2 => "drop2",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordField {
    type Err = LaundryError;

    /// Accepts the column label or the short name, ignoring case, spaces,
    /// hyphens, and underscores.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let field = match key.as_str() {
            "coin" => RecordField::Coin,
            "hopper" => RecordField::Hopper,
            "soap" => RecordField::Soap,
            "vending" => RecordField::Vending,
            "dropoffamount1" | "drop1" => RecordField::DropOffAmount1,
            "dropoffcode" | "code" => RecordField::DropOffCode,
            "dropoffamount2" | "drop2" => RecordField::DropOffAmount2,
            _ => return Err(LaundryError::UnknownField(input.to_string())),
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_short_names_parse_back() {
        for field in RecordField::ALL {
            assert_eq!(field.label().parse::<RecordField>().unwrap(), field);
            assert_eq!(field.short_name().parse::<RecordField>().unwrap(), field);
        }
        assert_eq!(
            "drop_off-code".parse::<RecordField>().unwrap(),
            RecordField::DropOffCode
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "Detergent".parse::<RecordField>().unwrap_err();
        assert!(matches!(err, LaundryError::UnknownField(name) if name == "Detergent"));
    }
}
