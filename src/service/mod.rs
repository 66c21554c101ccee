pub mod audit;
pub mod invoice_number;
