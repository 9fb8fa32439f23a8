//! Energy supplied at a location: generation mix and environmental impact.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{self, check, optional_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergySourceCategory {
    Nuclear,
    GeneralFossil,
    Coal,
    Gas,
    GeneralGreen,
    Solar,
    Wind,
    Water,
}

impl EnergySourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nuclear => "NUCLEAR",
            Self::GeneralFossil => "GENERAL_FOSSIL",
            Self::Coal => "COAL",
            Self::Gas => "GAS",
            Self::GeneralGreen => "GENERAL_GREEN",
            Self::Solar => "SOLAR",
            Self::Wind => "WIND",
            Self::Water => "WATER",
        }
    }

    pub fn is_renewable(&self) -> bool {
        matches!(
            self,
            Self::GeneralGreen | Self::Solar | Self::Wind | Self::Water
        )
    }
}

impl fmt::Display for EnergySourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentalImpactCategory {
    NuclearWaste,
    CarbonDioxide,
}

impl EnvironmentalImpactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NuclearWaste => "NUCLEAR_WASTE",
            Self::CarbonDioxide => "CARBON_DIOXIDE",
        }
    }
}

impl fmt::Display for EnvironmentalImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of one energy source in the supplied mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EnergySourceWire")]
pub struct EnergySource {
    source: EnergySourceCategory,
    /// Percentage of this source (0-100) in the mix.
    percentage: Decimal,
}

#[derive(Deserialize)]
struct EnergySourceWire {
    source: EnergySourceCategory,
    percentage: Decimal,
}

impl EnergySource {
    pub fn new(source: EnergySourceCategory, percentage: Decimal) -> Result<Self, OcpiError> {
        let percentage = validations::amount("percentage", percentage)?;
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(OcpiError::invalid(
                "percentage",
                format!("{percentage} is outside 0..100"),
            ));
        }
        Ok(Self { source, percentage })
    }

    pub fn source(&self) -> EnergySourceCategory {
        self.source
    }

    pub fn percentage(&self) -> Decimal {
        self.percentage
    }
}

impl TryFrom<EnergySourceWire> for EnergySource {
    type Error = OcpiError;

    fn try_from(wire: EnergySourceWire) -> Result<Self, Self::Error> {
        Self::new(wire.source, wire.percentage)
    }
}

impl OcpiObject for EnergySource {
    const KIND: &'static str = "energy source";
}

value_semantics!(EnergySource { source, percentage });

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}%", self.source, self.percentage)
    }
}

/// Environmental impact of the supplied energy, in g/kWh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EnvironmentalImpactWire")]
pub struct EnvironmentalImpact {
    category: EnvironmentalImpactCategory,
    amount: Decimal,
}

#[derive(Deserialize)]
struct EnvironmentalImpactWire {
    category: EnvironmentalImpactCategory,
    amount: Decimal,
}

impl EnvironmentalImpact {
    pub fn new(category: EnvironmentalImpactCategory, amount: Decimal) -> Result<Self, OcpiError> {
        let amount = validations::amount("amount", amount)?;
        if amount < Decimal::ZERO {
            return Err(OcpiError::invalid("amount", "must not be negative"));
        }
        Ok(Self { category, amount })
    }

    pub fn category(&self) -> EnvironmentalImpactCategory {
        self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TryFrom<EnvironmentalImpactWire> for EnvironmentalImpact {
    type Error = OcpiError;

    fn try_from(wire: EnvironmentalImpactWire) -> Result<Self, Self::Error> {
        Self::new(wire.category, wire.amount)
    }
}

impl OcpiObject for EnvironmentalImpact {
    const KIND: &'static str = "environmental impact";
}

value_semantics!(EnvironmentalImpact { category, amount });

impl fmt::Display for EnvironmentalImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} g/kWh", self.category, self.amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "EnergyMixWire")]
pub struct EnergyMix {
    is_green_energy: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    energy_sources: Vec<EnergySource>,
    #[serde(rename = "environ_impact", skip_serializing_if = "Vec::is_empty")]
    environmental_impacts: Vec<EnvironmentalImpact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    energy_product_name: Option<String>,
}

#[derive(Deserialize)]
struct EnergyMixWire {
    is_green_energy: bool,
    #[serde(default)]
    energy_sources: Option<Vec<EnergySource>>,
    #[serde(default)]
    environ_impact: Option<Vec<EnvironmentalImpact>>,
    supplier_name: Option<String>,
    energy_product_name: Option<String>,
}

impl EnergyMix {
    pub fn new(
        is_green_energy: bool,
        energy_sources: impl IntoIterator<Item = EnergySource>,
        environmental_impacts: impl IntoIterator<Item = EnvironmentalImpact>,
        supplier_name: Option<String>,
        energy_product_name: Option<String>,
    ) -> Result<Self, OcpiError> {
        let mix = Self {
            is_green_energy,
            energy_sources: distinct(energy_sources),
            environmental_impacts: distinct(environmental_impacts),
            supplier_name: optional_text(supplier_name),
            energy_product_name: optional_text(energy_product_name),
        };
        check(&mix)?;
        Ok(mix)
    }

    pub fn is_green_energy(&self) -> bool {
        self.is_green_energy
    }

    pub fn energy_sources(&self) -> &[EnergySource] {
        &self.energy_sources
    }

    pub fn environmental_impacts(&self) -> &[EnvironmentalImpact] {
        &self.environmental_impacts
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn energy_product_name(&self) -> Option<&str> {
        self.energy_product_name.as_deref()
    }

    /// Sum of the percentages of all renewable sources.
    pub fn renewable_percentage(&self) -> Decimal {
        self.energy_sources
            .iter()
            .filter(|source| source.source().is_renewable())
            .map(EnergySource::percentage)
            .sum()
    }
}

impl TryFrom<EnergyMixWire> for EnergyMix {
    type Error = OcpiError;

    fn try_from(wire: EnergyMixWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.is_green_energy,
            wire.energy_sources.unwrap_or_default(),
            wire.environ_impact.unwrap_or_default(),
            wire.supplier_name,
            wire.energy_product_name,
        )
    }
}

impl OcpiObject for EnergyMix {
    const KIND: &'static str = "energy mix";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "energy_sources", &self.energy_sources)?;
        hooks.rewrite_many(json, "environ_impact", &self.environmental_impacts)
    }
}

value_semantics!(EnergyMix {
    is_green_energy,
    supplier_name,
    energy_product_name
} sets {
    energy_sources,
    environmental_impacts
});

impl fmt::Display for EnergyMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_green_energy { "green" } else { "grey" };
        match (&self.supplier_name, &self.energy_product_name) {
            (Some(supplier), Some(product)) => write!(f, "{kind} energy: {product} by {supplier}"),
            (Some(supplier), None) => write!(f, "{kind} energy by {supplier}"),
            _ => write!(f, "{kind} energy"),
        }
    }
}
