use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Salary {
    pub id: u64,
    pub employee_id: u64,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub net_salary: f64,
    #[schema(value_type = String, format = "date")]
    pub pay_date: Option<NaiveDate>,
}
