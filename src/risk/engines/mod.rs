// Concrete risk engines
pub mod rule_based;

pub use rule_based::RuleBasedRiskEngine;
