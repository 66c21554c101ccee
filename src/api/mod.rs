pub mod assets;
pub mod attendance;
pub mod audit;
pub mod employees;
pub mod fees;
pub mod grants;
pub mod invoices;
pub mod ledger;
pub mod payments;
pub mod payroll;
pub mod purchases;
pub mod reports;
pub mod salaries;
pub mod students;
pub mod transactions;
pub mod users;

/// Clamped pagination window. The offset is widened to u64 before the
/// multiplication so a caller-supplied page near `u32::MAX` cannot overflow.
pub(crate) fn page_window(page: Option<u32>, per_page: Option<u32>) -> (u32, u32, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page as u64 - 1) * per_page as u64;
    (page, per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn defaults_apply() {
        assert_eq!(page_window(None, None), (1, 10, 0));
    }

    #[test]
    fn window_advances_by_per_page() {
        assert_eq!(page_window(Some(3), Some(25)), (3, 25, 50));
    }

    #[test]
    fn zero_page_is_clamped_to_first() {
        assert_eq!(page_window(Some(0), Some(10)), (1, 10, 0));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let (page, per_page, offset) = page_window(Some(u32::MAX), Some(100));
        assert_eq!(page, u32::MAX);
        assert_eq!(per_page, 100);
        assert_eq!(offset, (u32::MAX as u64 - 1) * 100);
    }

    #[test]
    fn per_page_is_capped() {
        assert_eq!(page_window(Some(1), Some(10_000)), (1, 100, 0));
    }
}
