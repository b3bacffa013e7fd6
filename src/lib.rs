pub mod attendance;
pub mod config;
pub mod database;
pub mod provider;
pub mod sales;
pub mod utils;
