//! Database module: models, schema and queries for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `GarageStorage`, connection setup, users and activity log
//! - one file per area for the remaining `GarageStorage` queries

pub mod catalog;
pub mod customers;
pub mod models;
pub mod reminders;
pub mod schema;
pub mod sqlite;
pub mod tires;
pub mod vehicles;
pub mod work_orders;

pub use catalog::Decrement;
pub use schema::SQLITE_INIT;
pub use sqlite::{GarageStorage, SqlitePool, hash_password};
pub use work_orders::WorkOrderDraft;
