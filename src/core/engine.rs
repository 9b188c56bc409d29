use super::types::{ProFormaInputs, ProFormaResult};

/// Annualized single-period snapshot for one property scenario. Pure and
/// total over validated inputs; rounding and formatting stay with callers.
pub fn generate_pro_forma(inputs: &ProFormaInputs) -> ProFormaResult {
    let gross_rental_income = inputs.monthly_rental_income * 12.0;
    let effective_rental_income = gross_rental_income * (1.0 - inputs.vacancy_rate);

    let management_fee = effective_rental_income * inputs.management_fee_percent;
    let maintenance_reserve = effective_rental_income * inputs.maintenance_reserve_percent;
    let operating_expenses_annual = inputs.monthly_operating_expenses * 12.0;
    let total_operating_expenses = operating_expenses_annual
        + management_fee
        + maintenance_reserve
        + inputs.property_taxes
        + inputs.insurance
        + inputs.other_expenses;

    let noi = effective_rental_income - total_operating_expenses;
    let cap_rate = noi / inputs.purchase_price * 100.0;

    let cash_flow_after_debt = noi - annual_debt_service(inputs);
    let cash_on_cash_return = cash_flow_after_debt / total_cash_invested(inputs) * 100.0;
    let gross_rent_multiplier = inputs.purchase_price / gross_rental_income;

    ProFormaResult {
        gross_rental_income,
        effective_rental_income,
        management_fee,
        maintenance_reserve,
        operating_expenses_annual,
        total_operating_expenses,
        noi,
        cap_rate,
        cash_flow_after_debt,
        cash_on_cash_return,
        gross_rent_multiplier,
    }
}

// All-cash purchase: no loan terms exist in the input schema, so debt
// service is zero and the cash basis is the full purchase price. These two
// helpers are the only places a financed variant would change.
fn annual_debt_service(_inputs: &ProFormaInputs) -> f64 {
    0.0
}

fn total_cash_invested(inputs: &ProFormaInputs) -> f64 {
    inputs.purchase_price
}
