//! API groups exposed by [`BankSheetsClient`](crate::BankSheetsClient).

mod accounts;
mod management;
mod sheets;
mod transactions;

pub use accounts::AccountsApi;
pub use management::ManagementApi;
pub use sheets::SheetsApi;
pub use transactions::TransactionsApi;
