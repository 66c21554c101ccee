use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct FeePayment {
    pub id: u64,
    pub student_id: u64,
    pub fee_id: u64,
    pub amount_paid: f64,
    #[schema(value_type = String, format = "date")]
    pub payment_date: NaiveDate,
    #[schema(example = "bank_transfer")]
    pub payment_method: Option<String>,
    pub reference_no: Option<String>,
    pub status: Option<String>,
}
