pub mod contract;
pub mod market;
pub mod portfolio;
pub mod stock;
pub mod tax;
