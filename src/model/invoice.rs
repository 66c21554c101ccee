use chrono::NaiveDate;
use serde::Serialize;
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "student_id": 7,
        "invoice_number": "INV-2024-0001",
        "total_amount": 1250.0,
        "issue_date": "2024-03-01",
        "due_date": "2024-03-15",
        "status": "issued"
    })
)]
pub struct Invoice {
    pub id: u64,
    pub student_id: u64,
    /// Immutable once assigned, unique across the system.
    #[schema(example = "INV-2024-0001")]
    pub invoice_number: String,
    pub total_amount: f64,
    #[schema(value_type = String, format = "date")]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    #[schema(example = "issued")]
    pub status: String,
}

/// The status column is free text in storage; inputs are constrained to
/// this set at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Overdue,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_lowercase() {
        assert_eq!(InvoiceStatus::from_str("draft").unwrap(), InvoiceStatus::Draft);
        assert_eq!(InvoiceStatus::from_str("paid").unwrap(), InvoiceStatus::Paid);
        assert_eq!(
            InvoiceStatus::from_str("cancelled").unwrap(),
            InvoiceStatus::Cancelled
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(InvoiceStatus::from_str("settled").is_err());
        assert!(InvoiceStatus::from_str("PAID ").is_err());
    }

    #[test]
    fn status_round_trips_as_lowercase_text() {
        assert_eq!(InvoiceStatus::Overdue.to_string(), "overdue");
    }
}
