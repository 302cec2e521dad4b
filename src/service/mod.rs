pub mod audit;
pub mod stock;
