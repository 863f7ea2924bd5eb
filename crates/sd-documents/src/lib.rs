//! # sd-documents
//!
//! One parameterized PDF builder for every document the office sends
//! out: estimates, invoices, receipts, and payment reports. All four
//! share the same cursor-driven layout engine; a [`DocumentKind`] picks
//! the sections.
//!
//! Generation is all-or-nothing: any failure aborts the whole document
//! and no partial bytes leave this crate.

pub mod data;
pub mod error;
pub mod layout;
pub mod name;
pub mod qr;
pub mod render;
pub mod share;

pub use data::{BankInfo, CompanyInfo, DocumentData, DocumentKind, LineRow, PartyInfo, PaymentRowData, TotalsBlock};
pub use error::DocumentError;
pub use name::document_file_name;
pub use render::render;
pub use share::whatsapp_share_link;
