pub mod risk_analysis_service;

pub use risk_analysis_service::*;
