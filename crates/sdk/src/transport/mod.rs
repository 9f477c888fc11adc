//! Transport layer for the Bank Sheets SDK.

pub mod http;

pub use http::HttpTransport;
