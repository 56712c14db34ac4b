use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Strength recorded for a category qualified by a strong trigger.
pub const STRONG_MATCH_STRENGTH: u8 = 100;
/// Strength recorded for a category qualified by two or more medium triggers.
pub const MEDIUM_MATCH_STRENGTH: u8 = 60;

/// Coarse qualitative label derived from the numeric risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Low,
    Watch,
    High,
    Critical,
}

impl RiskBand {
    pub const ALL: [RiskBand; 4] = [RiskBand::Low, RiskBand::Watch, RiskBand::High, RiskBand::Critical];

    /// Band for a score using the standard cut points (30 / 55 / 75).
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskBand::Low,
            30..=54 => RiskBand::Watch,
            55..=74 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Watch => "WATCH",
            RiskBand::High => "HIGH",
            RiskBand::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed enumeration of supply chain risk categories.
///
/// Declaration order is the enumeration order: detection walks categories in
/// this order and `Ord` follows it, so maps keyed by category iterate the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    SupplyShortage,
    LeadTimeVolatility,
    PriceVolatility,
    EolLifecycle,
    BomChangeCompatibility,
    TariffTradePolicy,
    ExportControlsSanctions,
    GeopoliticalConflict,
    LogisticsShippingDisruption,
    FactoryFabOutage,
    QualityCounterfeit,
    SupplierFinancialRisk,
    RegulatoryCompliance,
    CyberSecurityOperational,
    DemandShock,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 15] = [
        RiskCategory::SupplyShortage,
        RiskCategory::LeadTimeVolatility,
        RiskCategory::PriceVolatility,
        RiskCategory::EolLifecycle,
        RiskCategory::BomChangeCompatibility,
        RiskCategory::TariffTradePolicy,
        RiskCategory::ExportControlsSanctions,
        RiskCategory::GeopoliticalConflict,
        RiskCategory::LogisticsShippingDisruption,
        RiskCategory::FactoryFabOutage,
        RiskCategory::QualityCounterfeit,
        RiskCategory::SupplierFinancialRisk,
        RiskCategory::RegulatoryCompliance,
        RiskCategory::CyberSecurityOperational,
        RiskCategory::DemandShock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::SupplyShortage => "SUPPLY_SHORTAGE",
            RiskCategory::LeadTimeVolatility => "LEAD_TIME_VOLATILITY",
            RiskCategory::PriceVolatility => "PRICE_VOLATILITY",
            RiskCategory::EolLifecycle => "EOL_LIFECYCLE",
            RiskCategory::BomChangeCompatibility => "BOM_CHANGE_COMPATIBILITY",
            RiskCategory::TariffTradePolicy => "TARIFF_TRADE_POLICY",
            RiskCategory::ExportControlsSanctions => "EXPORT_CONTROLS_SANCTIONS",
            RiskCategory::GeopoliticalConflict => "GEOPOLITICAL_CONFLICT",
            RiskCategory::LogisticsShippingDisruption => "LOGISTICS_SHIPPING_DISRUPTION",
            RiskCategory::FactoryFabOutage => "FACTORY_FAB_OUTAGE",
            RiskCategory::QualityCounterfeit => "QUALITY_COUNTERFEIT",
            RiskCategory::SupplierFinancialRisk => "SUPPLIER_FINANCIAL_RISK",
            RiskCategory::RegulatoryCompliance => "REGULATORY_COMPLIANCE",
            RiskCategory::CyberSecurityOperational => "CYBER_SECURITY_OPERATIONAL",
            RiskCategory::DemandShock => "DEMAND_SHOCK",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown risk category: {}", s))
    }
}

/// Estimated window in which the described event hits procurement.
///
/// Declaration order is the trigger scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeHorizon {
    #[serde(rename = "IMMEDIATE_0_2W")]
    Immediate,
    #[serde(rename = "NEAR_2_8W")]
    Near,
    #[serde(rename = "MEDIUM_2_6M")]
    Medium,
    #[serde(rename = "LONG_6M_PLUS")]
    Long,
}

impl TimeHorizon {
    pub const PRIORITY: [TimeHorizon; 4] = [
        TimeHorizon::Immediate,
        TimeHorizon::Near,
        TimeHorizon::Medium,
        TimeHorizon::Long,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeHorizon::Immediate => "IMMEDIATE_0_2W",
            TimeHorizon::Near => "NEAR_2_8W",
            TimeHorizon::Medium => "MEDIUM_2_6M",
            TimeHorizon::Long => "LONG_6M_PLUS",
        }
    }

    /// Immediacy points before any recency bonus
    pub fn base_immediacy(&self) -> u8 {
        match self {
            TimeHorizon::Immediate => 20,
            TimeHorizon::Near => 12,
            TimeHorizon::Medium => 6,
            TimeHorizon::Long => 2,
        }
    }
}

impl Default for TimeHorizon {
    fn default() -> Self {
        TimeHorizon::Near
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk verdict for a single article.
///
/// Serialises to the flat mapping stored next to the article:
/// `{risk_score, risk_band, risk_categories, confidence, time_horizon, category_strength}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_score: u8,
    pub risk_band: RiskBand,
    pub risk_categories: Vec<RiskCategory>,
    pub confidence: u8,
    pub time_horizon: TimeHorizon,
    pub category_strength: BTreeMap<RiskCategory, u8>,
}

impl RiskAnalysis {
    /// Flat JSON mapping of the verdict
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn has_category(&self, category: RiskCategory) -> bool {
        self.category_strength.contains_key(&category)
    }

    pub fn strength_of(&self, category: RiskCategory) -> Option<u8> {
        self.category_strength.get(&category).copied()
    }
}

/// The four additive subscores behind `risk_score`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub severity: u8,
    pub immediacy: u8,
    pub procurement_relevance: u8,
    pub specificity: u8,
}

impl ScoreComponents {
    /// Sum of the components clamped into [0, 100]
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.severity)
            + u16::from(self.immediacy)
            + u16::from(self.procurement_relevance)
            + u16::from(self.specificity);
        sum.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(29), RiskBand::Low);
        assert_eq!(RiskBand::from_score(30), RiskBand::Watch);
        assert_eq!(RiskBand::from_score(54), RiskBand::Watch);
        assert_eq!(RiskBand::from_score(55), RiskBand::High);
        assert_eq!(RiskBand::from_score(74), RiskBand::High);
        assert_eq!(RiskBand::from_score(75), RiskBand::Critical);
        assert_eq!(RiskBand::from_score(100), RiskBand::Critical);
    }

    #[test]
    fn test_category_order_matches_enumeration() {
        let mut sorted = RiskCategory::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, RiskCategory::ALL.to_vec());
        assert_eq!(RiskCategory::ALL.len(), 15);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("eol_lifecycle".parse::<RiskCategory>().unwrap(), RiskCategory::EolLifecycle);
        assert!("NOT_A_CATEGORY".parse::<RiskCategory>().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let mut category_strength = BTreeMap::new();
        category_strength.insert(RiskCategory::FactoryFabOutage, STRONG_MATCH_STRENGTH);
        let analysis = RiskAnalysis {
            risk_score: 80,
            risk_band: RiskBand::Critical,
            risk_categories: vec![RiskCategory::FactoryFabOutage],
            confidence: 75,
            time_horizon: TimeHorizon::Immediate,
            category_strength,
        };

        let value = analysis.to_value().unwrap();
        assert_eq!(value["risk_band"], "CRITICAL");
        assert_eq!(value["time_horizon"], "IMMEDIATE_0_2W");
        assert_eq!(value["risk_categories"][0], "FACTORY_FAB_OUTAGE");
        assert_eq!(value["category_strength"]["FACTORY_FAB_OUTAGE"], 100);
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_component_total_is_clamped() {
        let components = ScoreComponents {
            severity: 35,
            immediacy: 20,
            procurement_relevance: 25,
            specificity: 20,
        };
        assert_eq!(components.total(), 100);

        let oversized = ScoreComponents {
            severity: 90,
            immediacy: 90,
            procurement_relevance: 0,
            specificity: 0,
        };
        assert_eq!(oversized.total(), 100);
    }
}
