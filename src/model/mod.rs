pub mod asset;
pub mod attendance;
pub mod audit_log;
pub mod employee;
pub mod fee;
pub mod fee_payment;
pub mod grant;
pub mod invoice;
pub mod ledger_entry;
pub mod payroll;
pub mod purchase;
pub mod report;
pub mod role;
pub mod salary;
pub mod student;
pub mod transaction;
pub mod user;
