use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ProFormaInputs {
    pub purchase_price: f64,
    pub monthly_rental_income: f64,
    pub monthly_operating_expenses: f64,
    pub vacancy_rate: f64,
    pub management_fee_percent: f64,
    pub maintenance_reserve_percent: f64,
    pub property_taxes: f64,
    pub insurance: f64,
    pub other_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProFormaResult {
    pub gross_rental_income: f64,
    pub effective_rental_income: f64,
    pub management_fee: f64,
    pub maintenance_reserve: f64,
    pub operating_expenses_annual: f64,
    pub total_operating_expenses: f64,
    pub noi: f64,
    pub cap_rate: f64,
    pub cash_flow_after_debt: f64,
    pub cash_on_cash_return: f64,
    pub gross_rent_multiplier: f64,
}
