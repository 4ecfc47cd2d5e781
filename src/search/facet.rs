use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dimension by which results can be narrowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Ingredient,
    Appliance,
    #[serde(alias = "ustensil")]
    Utensil,
}

impl Facet {
    /// Order in which tag filters are applied
    pub const ALL: [Facet; 3] = [Facet::Ingredient, Facet::Appliance, Facet::Utensil];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Ingredient => "ingredient",
            Facet::Appliance => "appliance",
            Facet::Utensil => "utensil",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(Facet::Ingredient),
            "appliance" | "appliances" => Ok(Facet::Appliance),
            "utensil" | "utensils" | "ustensil" | "ustensils" => Ok(Facet::Utensil),
            other => Err(Error::Validation(format!(
                "Unknown facet: {other}. Must be ingredient, appliance, or utensil"
            ))),
        }
    }
}

/// A single selected value within one facet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub facet: Facet,
    pub value: String,
}

impl Tag {
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self {
            facet,
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.facet, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facet() {
        assert_eq!("ingredient".parse::<Facet>().unwrap(), Facet::Ingredient);
        assert_eq!("Appliance".parse::<Facet>().unwrap(), Facet::Appliance);
        assert_eq!("ustensil".parse::<Facet>().unwrap(), Facet::Utensil);
        assert!("spice".parse::<Facet>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for facet in Facet::ALL {
            assert_eq!(facet.to_string().parse::<Facet>().unwrap(), facet);
        }
    }
}
