pub mod article;
pub mod risk_analysis;

pub use article::*;
pub use risk_analysis::*;
