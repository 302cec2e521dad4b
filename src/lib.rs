pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use db::GarageStorage;
pub use error::GarageError;
pub use router::{GarageState, garage_router};
