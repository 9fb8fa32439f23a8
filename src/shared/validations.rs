use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use super::errors::OcpiError;

/// Runs the `validator` rules declared on `value`.
pub fn check<T: Validate>(value: &T) -> Result<(), OcpiError> {
    value.validate().map_err(OcpiError::from)
}

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &'static str, value: impl Into<String>) -> Result<String, OcpiError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OcpiError::invalid(field, "must not be null or empty"));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text; blank text counts as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rejects an empty list.
pub fn required_list<T>(field: &'static str, items: Vec<T>) -> Result<Vec<T>, OcpiError> {
    if items.is_empty() {
        return Err(OcpiError::invalid(field, "must contain at least one element"));
    }
    Ok(items)
}

/// Decimal places kept on amounts.
pub const AMOUNT_DECIMALS: u32 = 6;

/// Exclusive upper bound on the magnitude of an amount.
pub const MAX_AMOUNT: u64 = 1_000_000_000;

/// Rounds `value` to [`AMOUNT_DECIMALS`] places and rejects magnitudes from
/// [`MAX_AMOUNT`] up.
///
/// Amounts travel as JSON numbers (`f64`); at most 15 significant digits
/// come back unchanged.
pub fn amount(field: &'static str, value: Decimal) -> Result<Decimal, OcpiError> {
    let rounded = value.round_dp(AMOUNT_DECIMALS);
    if rounded.abs() >= Decimal::from(MAX_AMOUNT) {
        return Err(OcpiError::invalid(
            field,
            format!("must be below {MAX_AMOUNT} in magnitude"),
        ));
    }
    Ok(rounded)
}

impl From<ValidationErrors> for OcpiError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&'static str> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        match fields.first().copied() {
            Some(field) => {
                let message = field_errors
                    .get(field)
                    .and_then(|errs| errs.first())
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                OcpiError::invalid(field, message)
            }
            None => OcpiError::invalid("value", errors.to_string()),
        }
    }
}
