pub mod config;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;
pub mod error;

pub use error::types::*;
