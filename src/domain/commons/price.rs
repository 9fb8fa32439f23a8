use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::semantics::value_semantics;
use crate::shared::validations::amount;
use crate::shared::{OcpiError, OcpiObject};

/// An amount with and without VAT, in the currency of the surrounding object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PriceWire")]
pub struct Price {
    excl_vat: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    incl_vat: Option<Decimal>,
}

#[derive(Deserialize)]
struct PriceWire {
    excl_vat: Decimal,
    incl_vat: Option<Decimal>,
}

impl Price {
    pub fn new(excl_vat: Decimal, incl_vat: Option<Decimal>) -> Result<Self, OcpiError> {
        let excl_vat = amount("excl_vat", excl_vat)?;
        let incl_vat = incl_vat
            .map(|incl_vat| amount("incl_vat", incl_vat))
            .transpose()?;
        if excl_vat.is_sign_negative() && !excl_vat.is_zero() {
            return Err(OcpiError::invalid("excl_vat", "must not be negative"));
        }
        if let Some(incl_vat) = incl_vat {
            if incl_vat < excl_vat {
                return Err(OcpiError::invalid(
                    "incl_vat",
                    "must not be lower than the price excluding VAT",
                ));
            }
        }
        Ok(Self { excl_vat, incl_vat })
    }

    pub fn excl_vat(&self) -> Decimal {
        self.excl_vat
    }

    pub fn incl_vat(&self) -> Option<Decimal> {
        self.incl_vat
    }
}

impl TryFrom<PriceWire> for Price {
    type Error = OcpiError;

    fn try_from(wire: PriceWire) -> Result<Self, Self::Error> {
        Self::new(wire.excl_vat, wire.incl_vat)
    }
}

impl OcpiObject for Price {
    const KIND: &'static str = "price";
}

value_semantics!(Price { excl_vat, incl_vat });

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.incl_vat {
            Some(incl_vat) => write!(f, "{} excl. VAT / {} incl. VAT", self.excl_vat, incl_vat),
            None => write!(f, "{} excl. VAT", self.excl_vat),
        }
    }
}
