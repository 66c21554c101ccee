use crate::api::fees::{CreateFee, FeeListResponse, UpdateFee};
use crate::api::invoices::{
    CreateInvoice, InvoiceDocument, InvoiceLineItem, InvoiceListResponse, UpdateInvoice,
};
use crate::api::payments::{CreatePayment, PaymentListResponse};
use crate::api::users::{CreateUser, UpdateUser};
use crate::model::asset::Asset;
use crate::model::attendance::Attendance;
use crate::model::audit_log::AuditLog;
use crate::model::employee::Employee;
use crate::model::fee::Fee;
use crate::model::fee_payment::FeePayment;
use crate::model::grant::Grant;
use crate::model::invoice::Invoice;
use crate::model::ledger_entry::LedgerEntry;
use crate::model::payroll::Payroll;
use crate::model::purchase::Purchase;
use crate::model::report::Report;
use crate::model::salary::Salary;
use crate::model::student::Student;
use crate::model::transaction::Transaction;
use crate::model::user::User;
use crate::models::{LoginReqDto, TokenPairDto};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Educational Finance API",
        version = "1.0.0",
        description = r#"
## Educational Financial Management System

Record-keeping backend for an educational institution's financial
operations: students, employees, fees, payments, invoices, salaries,
attendance, payroll, transactions, ledger, assets, purchases, grants,
reports and an append-only audit trail.

### Security
All routes under the API prefix require a **JWT Bearer access token**.
Payment creation requires the **accountant** or **admin** role; user
administration requires **admin**.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    modifiers(&SecurityAddon),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,

        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        crate::api::students::create_student,
        crate::api::students::list_students,

        crate::api::employees::create_employee,
        crate::api::employees::list_employees,

        crate::api::fees::create_fee,
        crate::api::fees::list_fees,
        crate::api::fees::get_fee,
        crate::api::fees::update_fee,
        crate::api::fees::delete_fee,

        crate::api::payments::create_payment,
        crate::api::payments::list_payments,

        crate::api::invoices::create_invoice,
        crate::api::invoices::list_invoices,
        crate::api::invoices::get_invoice,
        crate::api::invoices::update_invoice,
        crate::api::invoices::delete_invoice,
        crate::api::invoices::invoice_document,

        crate::api::salaries::create_salary,
        crate::api::salaries::list_salaries,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,

        crate::api::payroll::create_payroll,
        crate::api::payroll::list_payrolls,

        crate::api::transactions::create_transaction,
        crate::api::transactions::list_transactions,

        crate::api::ledger::create_ledger_entry,
        crate::api::ledger::list_ledger_entries,

        crate::api::assets::create_asset,
        crate::api::assets::list_assets,

        crate::api::purchases::create_purchase,
        crate::api::purchases::list_purchases,

        crate::api::grants::create_grant,
        crate::api::grants::list_grants,

        crate::api::reports::create_report,
        crate::api::reports::list_reports,

        crate::api::audit::list_audit_logs
    ),
    components(
        schemas(
            LoginReqDto,
            TokenPairDto,
            CreateUser,
            UpdateUser,
            User,
            crate::api::students::CreateStudent,
            Student,
            crate::api::employees::CreateEmployee,
            Employee,
            CreateFee,
            UpdateFee,
            Fee,
            FeeListResponse,
            CreatePayment,
            FeePayment,
            PaymentListResponse,
            CreateInvoice,
            UpdateInvoice,
            Invoice,
            InvoiceListResponse,
            InvoiceLineItem,
            InvoiceDocument,
            crate::api::salaries::CreateSalary,
            Salary,
            crate::api::attendance::CreateAttendance,
            Attendance,
            crate::api::payroll::CreatePayroll,
            Payroll,
            crate::api::transactions::CreateTransaction,
            Transaction,
            crate::api::ledger::CreateLedgerEntry,
            LedgerEntry,
            crate::api::assets::CreateAsset,
            Asset,
            crate::api::purchases::CreatePurchase,
            Purchase,
            crate::api::grants::CreateGrant,
            Grant,
            crate::api::reports::CreateReport,
            Report,
            AuditLog
        )
    ),
    tags(
        (name = "Authentication", description = "Login and token refresh"),
        (name = "Users", description = "User administration"),
        (name = "Students", description = "Student records"),
        (name = "Employees", description = "Employee records"),
        (name = "Fees", description = "Fee definitions"),
        (name = "Payments", description = "Fee payments with audit trail"),
        (name = "Invoices", description = "Invoices with year-scoped numbering"),
        (name = "Salaries", description = "Salary records"),
        (name = "Attendance", description = "Employee attendance"),
        (name = "Payroll", description = "Payroll runs"),
        (name = "Transactions", description = "Financial transactions"),
        (name = "Ledger", description = "Double-entry ledger"),
        (name = "Assets", description = "Asset register"),
        (name = "Purchases", description = "Purchase records"),
        (name = "Grants", description = "Grants received"),
        (name = "Reports", description = "Generated reports"),
        (name = "Audit", description = "Append-only audit trail"),
    )
)]
pub struct ApiDoc;
