use crate::error::ApiError;
use sqlx::{MySql, Transaction};

const PREFIX: &str = "INV";
const MAX_SEQUENCE: u32 = 9999;

#[derive(Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// 9999 numbers already issued for the year. Fails loudly; the format
    /// never widens or wraps silently.
    Exhausted,
    /// The stored predecessor does not match `INV-{year}-{nnnn}`.
    Malformed,
}

pub fn format_invoice_number(year: i32, sequence: u32) -> String {
    format!("{PREFIX}-{year}-{sequence:04}")
}

/// Numeric suffix of a well-formed invoice number for the given year.
pub fn parse_sequence(invoice_number: &str, year: i32) -> Option<u32> {
    let suffix = invoice_number.strip_prefix(&format!("{PREFIX}-{year}-"))?;
    if suffix.len() != 4 {
        return None;
    }
    suffix.parse().ok()
}

/// Successor of the highest issued number for the year, starting at 0001
/// when the year has none.
pub fn next_in_sequence(last: Option<&str>, year: i32) -> Result<String, SequenceError> {
    let next = match last {
        None => 1,
        Some(number) => {
            let seq = parse_sequence(number, year).ok_or(SequenceError::Malformed)?;
            if seq >= MAX_SEQUENCE {
                return Err(SequenceError::Exhausted);
            }
            seq + 1
        }
    };

    Ok(format_invoice_number(year, next))
}

/// Allocates the next invoice number for `year` inside the caller's
/// transaction. `FOR UPDATE` locks the current tail so two concurrent
/// creations serialize instead of computing the same successor; the unique
/// index on `invoice_number` backstops the lock.
pub async fn allocate(tx: &mut Transaction<'_, MySql>, year: i32) -> Result<String, ApiError> {
    let last: Option<String> = sqlx::query_scalar(
        r#"
        SELECT invoice_number
        FROM invoices
        WHERE invoice_number LIKE ?
        ORDER BY invoice_number DESC
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(format!("{PREFIX}-{year}-%"))
    .fetch_optional(&mut **tx)
    .await?;

    next_in_sequence(last.as_deref(), year).map_err(|e| {
        tracing::error!(year, last = ?last, reason = ?e, "invoice number allocation failed");
        ApiError::Fault
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_of_year_starts_at_0001() {
        assert_eq!(next_in_sequence(None, 2024).unwrap(), "INV-2024-0001");
    }

    #[test]
    fn successor_increments_by_one() {
        assert_eq!(
            next_in_sequence(Some("INV-2024-0001"), 2024).unwrap(),
            "INV-2024-0002"
        );
        assert_eq!(
            next_in_sequence(Some("INV-2024-0099"), 2024).unwrap(),
            "INV-2024-0100"
        );
    }

    #[test]
    fn padding_is_four_digits() {
        assert_eq!(format_invoice_number(2024, 7), "INV-2024-0007");
        assert_eq!(format_invoice_number(2024, 1234), "INV-2024-1234");
    }

    #[test]
    fn sequence_exhaustion_fails_loudly() {
        assert_eq!(
            next_in_sequence(Some("INV-2024-9999"), 2024),
            Err(SequenceError::Exhausted)
        );
    }

    #[test]
    fn malformed_tail_is_not_silently_restarted() {
        assert_eq!(
            next_in_sequence(Some("INV-2024-XYZ1"), 2024),
            Err(SequenceError::Malformed)
        );
        assert_eq!(
            next_in_sequence(Some("garbage"), 2024),
            Err(SequenceError::Malformed)
        );
    }

    #[test]
    fn other_years_do_not_match() {
        assert_eq!(parse_sequence("INV-2023-0042", 2024), None);
        assert_eq!(parse_sequence("INV-2024-0042", 2024), Some(42));
    }
}
