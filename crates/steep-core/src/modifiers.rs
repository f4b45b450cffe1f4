//! # Drink Modifier Model
//!
//! Closed enums for the four customization axes plus the combined
//! [`ModifierSelection`] attached to every cart line. Wire strings are fixed
//! by the composition surfaces ("small", "iced", "100%", …); anything else is
//! rejected at parse time rather than stored as junk.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::catalog::ToppingRef;

/// A modifier string that matches none of the known values.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownModifierError {
    /// Which axis was being parsed ("size", "sweetness", …).
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

/// Cup size. Medium and large carry fixed surcharges; small is the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Base size, no surcharge.
    #[default]
    Small,
    /// +0.50 surcharge.
    Medium,
    /// +1.00 surcharge.
    Large,
}

impl Size {
    /// Wire string for this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Size {
    type Err = UnknownModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(UnknownModifierError {
                kind: "size",
                value: other.to_string(),
            }),
        }
    }
}

/// Served temperature. Offered on the customer kiosk only; carries no price
/// delta and is not persisted to drink rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    /// Served over ice.
    #[default]
    Iced,
    /// Served hot.
    Hot,
}

impl Temperature {
    /// Wire string for this temperature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iced => "iced",
            Self::Hot => "hot",
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Temperature {
    type Err = UnknownModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iced" => Ok(Self::Iced),
            "hot" => Ok(Self::Hot),
            other => Err(UnknownModifierError {
                kind: "temperature",
                value: other.to_string(),
            }),
        }
    }
}

/// Sweetness level. No price delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
pub enum Sweetness {
    /// No sugar.
    #[serde(rename = "0%")]
    Zero,
    /// Light sugar.
    #[serde(rename = "35%")]
    ThirtyFive,
    /// Half sugar.
    #[serde(rename = "50%")]
    Half,
    /// Less sugar.
    #[serde(rename = "75%")]
    SeventyFive,
    /// Standard recipe.
    #[default]
    #[serde(rename = "100%")]
    Full,
    /// Extra sweet.
    #[serde(rename = "120%")]
    ExtraSweet,
}

impl Sweetness {
    /// Wire string for this sweetness level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0%",
            Self::ThirtyFive => "35%",
            Self::Half => "50%",
            Self::SeventyFive => "75%",
            Self::Full => "100%",
            Self::ExtraSweet => "120%",
        }
    }
}

impl std::fmt::Display for Sweetness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sweetness {
    type Err = UnknownModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0%" => Ok(Self::Zero),
            "35%" => Ok(Self::ThirtyFive),
            "50%" => Ok(Self::Half),
            "75%" => Ok(Self::SeventyFive),
            "100%" => Ok(Self::Full),
            "120%" => Ok(Self::ExtraSweet),
            other => Err(UnknownModifierError {
                kind: "sweetness",
                value: other.to_string(),
            }),
        }
    }
}

/// Ice level. No price delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
pub enum IceLevel {
    /// No ice.
    #[serde(rename = "0%")]
    None,
    /// Half ice.
    #[serde(rename = "50%")]
    Half,
    /// Standard ice.
    #[default]
    #[serde(rename = "100%")]
    Full,
    /// Extra ice.
    #[serde(rename = "120%")]
    Extra,
}

impl IceLevel {
    /// Wire string for this ice level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "0%",
            Self::Half => "50%",
            Self::Full => "100%",
            Self::Extra => "120%",
        }
    }
}

impl std::fmt::Display for IceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IceLevel {
    type Err = UnknownModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0%" => Ok(Self::None),
            "50%" => Ok(Self::Half),
            "100%" => Ok(Self::Full),
            "120%" => Ok(Self::Extra),
            other => Err(UnknownModifierError {
                kind: "ice",
                value: other.to_string(),
            }),
        }
    }
}

/// The full customization attached to one cart line.
///
/// Defaults mirror the composition popup's initial state: small, iced,
/// 100% sweetness, 100% ice, no toppings. There is no logical upper bound on
/// the topping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Default)]
pub struct ModifierSelection {
    /// Cup size.
    #[serde(default)]
    pub size: Size,
    /// Served temperature (kiosk only).
    #[serde(default)]
    pub temperature: Temperature,
    /// Sweetness level.
    #[serde(default)]
    pub sweetness: Sweetness,
    /// Ice level.
    #[serde(default)]
    pub ice: IceLevel,
    /// Selected toppings, in selection order.
    #[serde(default)]
    pub toppings: Vec<ToppingRef>,
}

impl ModifierSelection {
    /// Whether any axis differs from the defaults.
    pub fn is_customized(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_popup_initial_state() {
        let m = ModifierSelection::default();
        assert_eq!(m.size, Size::Small);
        assert_eq!(m.temperature, Temperature::Iced);
        assert_eq!(m.sweetness, Sweetness::Full);
        assert_eq!(m.ice, IceLevel::Full);
        assert!(m.toppings.is_empty());
        assert!(!m.is_customized());
    }

    #[test]
    fn size_wire_round_trip() {
        for s in [Size::Small, Size::Medium, Size::Large] {
            let parsed: Size = s.as_str().parse().unwrap();
            assert_eq!(parsed, s);
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
    }

    #[test]
    fn sweetness_wire_round_trip() {
        for s in [
            Sweetness::Zero,
            Sweetness::ThirtyFive,
            Sweetness::Half,
            Sweetness::SeventyFive,
            Sweetness::Full,
            Sweetness::ExtraSweet,
        ] {
            let parsed: Sweetness = s.as_str().parse().unwrap();
            assert_eq!(parsed, s);
            let back: Sweetness =
                serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
            assert_eq!(back, s);
        }
    }

    #[test]
    fn ice_wire_round_trip() {
        for i in [IceLevel::None, IceLevel::Half, IceLevel::Full, IceLevel::Extra] {
            let parsed: IceLevel = i.as_str().parse().unwrap();
            assert_eq!(parsed, i);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!("venti".parse::<Size>().is_err());
        assert!("lukewarm".parse::<Temperature>().is_err());
        assert!("85%".parse::<Sweetness>().is_err());
        assert!("200%".parse::<IceLevel>().is_err());

        let err = "venti".parse::<Size>().unwrap_err();
        assert_eq!(err.kind, "size");
        assert_eq!(err.value, "venti");
    }

    #[test]
    fn selection_deserializes_with_missing_axes() {
        // Legacy cashier payloads omit temperature entirely.
        let m: ModifierSelection = serde_json::from_value(serde_json::json!({
            "size": "large",
            "sweetness": "50%",
            "ice": "0%",
            "toppings": [],
        }))
        .unwrap();
        assert_eq!(m.size, Size::Large);
        assert_eq!(m.temperature, Temperature::Iced);
    }
}
