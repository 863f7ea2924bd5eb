//! API request handlers

pub mod banks;
pub mod categories;
pub mod clients;
pub mod documents;
pub mod estimates;
pub mod expenses;
pub mod materials;
pub mod payments;
pub mod stages;
pub mod subcategories;
pub mod users;
