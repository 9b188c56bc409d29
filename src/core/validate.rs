use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::ProFormaInputs;

/// A form value as submitted: HTML forms and query strings deliver numbers
/// as strings, JSON clients deliver them as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProFormaInput {
    pub purchase_price: Option<RawValue>,
    pub monthly_rental_income: Option<RawValue>,
    pub monthly_operating_expenses: Option<RawValue>,
    pub vacancy_rate: Option<RawValue>,
    pub management_fee_percent: Option<RawValue>,
    pub maintenance_reserve_percent: Option<RawValue>,
    pub property_taxes: Option<RawValue>,
    pub insurance: Option<RawValue>,
    pub other_expenses: Option<RawValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{field} {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("invalid input on {} field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

/// Checks every field and reports every violation in one pass; the engine
/// is only reachable through the `ProFormaInputs` this returns.
pub fn validate_inputs(raw: &RawProFormaInput) -> Result<ProFormaInputs, ValidationErrors> {
    let mut errors = Vec::new();

    let purchase_price = positive_amount(&mut errors, "purchasePrice", raw.purchase_price.as_ref());
    let monthly_rental_income = positive_amount(
        &mut errors,
        "monthlyRentalIncome",
        raw.monthly_rental_income.as_ref(),
    );
    let monthly_operating_expenses = non_negative_amount(
        &mut errors,
        "monthlyOperatingExpenses",
        raw.monthly_operating_expenses.as_ref(),
    );
    let vacancy_rate = unit_rate(&mut errors, "vacancyRate", raw.vacancy_rate.as_ref());
    let management_fee_percent = unit_rate(
        &mut errors,
        "managementFeePercent",
        raw.management_fee_percent.as_ref(),
    );
    let maintenance_reserve_percent = unit_rate(
        &mut errors,
        "maintenanceReservePercent",
        raw.maintenance_reserve_percent.as_ref(),
    );
    let property_taxes =
        non_negative_amount(&mut errors, "propertyTaxes", raw.property_taxes.as_ref());
    let insurance = non_negative_amount(&mut errors, "insurance", raw.insurance.as_ref());
    let other_expenses = match raw.other_expenses.as_ref() {
        None => Some(0.0),
        value => non_negative_amount(&mut errors, "otherExpenses", value),
    };

    let inputs = (|| {
        Some(ProFormaInputs {
            purchase_price: purchase_price?,
            monthly_rental_income: monthly_rental_income?,
            monthly_operating_expenses: monthly_operating_expenses?,
            vacancy_rate: vacancy_rate?,
            management_fee_percent: management_fee_percent?,
            maintenance_reserve_percent: maintenance_reserve_percent?,
            property_taxes: property_taxes?,
            insurance: insurance?,
            other_expenses: other_expenses?,
        })
    })();

    match inputs {
        Some(inputs) if errors.is_empty() => Ok(inputs),
        _ => Err(ValidationErrors { errors }),
    }
}

fn coerce(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&RawValue>,
) -> Option<f64> {
    let Some(value) = value else {
        errors.push(FieldError {
            field,
            message: "is required".to_string(),
        });
        return None;
    };

    match value.as_number() {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(FieldError {
                field,
                message: "must be a number".to_string(),
            });
            None
        }
    }
}

fn positive_amount(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&RawValue>,
) -> Option<f64> {
    let n = coerce(errors, field, value)?;
    if n <= 0.0 {
        errors.push(FieldError {
            field,
            message: "must be a positive number".to_string(),
        });
        return None;
    }
    Some(n)
}

fn non_negative_amount(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&RawValue>,
) -> Option<f64> {
    let n = coerce(errors, field, value)?;
    if n < 0.0 {
        errors.push(FieldError {
            field,
            message: "must be a non-negative number".to_string(),
        });
        return None;
    }
    Some(n)
}

// Rates are fractions: a form sending 8 to mean 8% is rejected, not rescaled.
fn unit_rate(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&RawValue>,
) -> Option<f64> {
    let n = coerce(errors, field, value)?;
    if !(0.0..=1.0).contains(&n) {
        errors.push(FieldError {
            field,
            message: "must be between 0 and 1".to_string(),
        });
        return None;
    }
    Some(n)
}
