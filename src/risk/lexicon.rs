// Trigger tables driving the rule-based engine
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::config::validator::validate_lexicon;
use crate::models::{RiskBand, RiskCategory, TimeHorizon};
use crate::risk::RiskError;

const ELECTRONICS_CONTEXT_WORDS: &[&str] = &[
    "semiconductor", "chip", "chips", "ic", "ics", "component", "components",
    "electronics", "electronic", "pcb", "assembly", "ems", "oem",
    "distributor", "inventory", "allocation", "lead time", "lead-time",
    "wafer", "fab", "fabs", "packaging", "module", "modules",
    "microchip", "microprocessor", "transistor", "capacitor", "resistor",
    "diode", "mosfet", "igbt", "mcu", "fpga", "memory", "dram", "nand",
    "mlcc", "sic", "gan", "connector", "passive", "passives",
];

const COMPONENT_FAMILIES: &[&str] = &[
    "mcu", "fpga", "memory", "mlcc", "mosfet", "igbt", "sic", "gan",
    "connector", "connectors", "passive", "passives", "pcb", "packaging",
    "dram", "nand", "flash", "sram", "cpu", "gpu", "asic", "soc",
    "power management", "pmic", "analog", "mixed-signal", "rf",
    "sensor", "sensors", "display", "led", "oled",
];

const PROCUREMENT_TERMS: &[&str] = &["allocation", "lead time", "lead-time", "pricing", "inventory", "supply"];

const CAPACITY_TERMS: &[&str] = &["capacity", "fab", "factory", "manufacturing", "logistics", "shipping"];

const OFFICIAL_INDICATORS: &[&str] = &[
    "announced", "statement", "official", "confirmed", "reported",
    "according to", "said", "disclosed", "filed", "regulatory filing",
    "press release", "earnings call", "quarterly report",
];

const CREDIBLE_SOURCES: &[&str] = &[
    "reuters", "bloomberg", "wsj", "financial times", "nikkei",
    "digitimes", "evertiq", "eenews", "semiconductor digest",
    "trendforce", "counterpoint", "idc", "gartner",
];

const VAGUE_INDICATORS: &[&str] = &[
    "may", "might", "could", "possibly", "potentially", "rumor",
    "speculation", "unconfirmed", "allegedly", "sources say",
];

/// (category, strong triggers, medium triggers)
const CATEGORY_TRIGGERS: &[(RiskCategory, &[&str], &[&str])] = &[
    (
        RiskCategory::SupplyShortage,
        &[
            "shortage", "allocation", "backorder", "out of stock", "constrained supply",
            "rationing", "supply crunch", "supply deficit", "undersupply", "supply gap",
        ],
        &[
            "tight supply", "limited availability", "scarcity", "supply pressure",
            "supply constraints", "low inventory",
        ],
    ),
    (
        RiskCategory::LeadTimeVolatility,
        &[
            "lead time", "lead-time", "extended lead times", "eta slipped", "shipments delayed",
            "delivery delay", "delivery delays", "lead times extended",
        ],
        &["backlog", "pushed out", "delayed fulfillment", "shipping delays", "fulfillment delays"],
    ),
    (
        RiskCategory::PriceVolatility,
        &[
            "spot price", "price spike", "price surge", "price increase", "asp up",
            "cost inflation", "price hike", "price jump", "prices soar", "prices surge",
        ],
        &["pricing pressure", "volatility", "price fluctuation", "cost increase", "margin pressure"],
    ),
    (
        RiskCategory::EolLifecycle,
        &[
            "end of life", "eol", "nrnd", "pcn", "last time buy", "discontinued",
            "end-of-life", "product discontinuation",
        ],
        &["obsolete", "lifecycle notice", "phase out", "phasing out", "legacy part", "mature product"],
    ),
    (
        RiskCategory::BomChangeCompatibility,
        &[
            "redesign", "requalification", "qualify alternate", "form fit function",
            "pin-to-pin", "design change",
        ],
        &[
            "alternate parts", "second source", "drop-in replacement", "bom change",
            "alternative supplier", "cross-reference",
        ],
    ),
    (
        RiskCategory::TariffTradePolicy,
        &[
            "tariff", "tariffs", "duty", "duties", "anti-dumping", "countervailing",
            "import tax", "trade remedy", "import duties", "export duties",
        ],
        &[
            "customs levy", "trade policy", "trade war", "trade dispute", "trade restrictions",
            "import restrictions",
        ],
    ),
    (
        RiskCategory::ExportControlsSanctions,
        &[
            "export control", "export controls", "entity list", "sanctions", "export ban",
            "license requirement", "export restriction", "trade ban", "blacklisted",
        ],
        &[
            "restricted exports", "blacklist", "controls tightened", "export license",
            "technology transfer",
        ],
    ),
    (
        RiskCategory::GeopoliticalConflict,
        &[
            "war", "conflict", "missile", "invasion", "taiwan strait", "escalation",
            "military action", "armed conflict",
        ],
        &[
            "geopolitical tension", "geopolitical risk", "standoff", "diplomatic crisis",
            "territorial dispute",
        ],
    ),
    (
        RiskCategory::LogisticsShippingDisruption,
        &[
            "port congestion", "shipping disruption", "red sea", "suez", "freight rates",
            "container shortage", "port closure", "shipping crisis",
        ],
        &[
            "logistics delays", "rerouting", "air freight", "sea freight",
            "supply chain disruption", "transit delays",
        ],
    ),
    (
        RiskCategory::FactoryFabOutage,
        &[
            "fab outage", "plant fire", "explosion", "earthquake", "power outage",
            "factory shutdown", "fab shutdown", "plant closure", "facility damage",
        ],
        &[
            "production halted", "capacity loss", "line stoppage", "manufacturing disruption",
            "facility closure",
        ],
    ),
    (
        RiskCategory::QualityCounterfeit,
        &[
            "counterfeit", "fake chips", "recall", "defect", "authenticity", "non-genuine",
            "fraudulent parts",
        ],
        &["field failure", "reliability issue", "quality issue", "quality concern", "testing failure"],
    ),
    (
        RiskCategory::SupplierFinancialRisk,
        &[
            "bankruptcy", "insolvency", "default", "debt restructuring", "liquidity crisis",
            "chapter 11", "liquidation",
        ],
        &["distress", "going concern", "credit downgrade", "financial difficulty", "cash flow"],
    ),
    (
        RiskCategory::RegulatoryCompliance,
        &[
            "rohs", "reach", "compliance violation", "regulatory ban", "restricted substance",
            "non-compliant",
        ],
        &["compliance update", "audit", "regulation", "regulatory", "certification", "standard"],
    ),
    (
        RiskCategory::CyberSecurityOperational,
        &[
            "ransomware", "cyberattack", "cyber attack", "systems down", "erp outage",
            "data breach", "hacked",
        ],
        &["security incident", "it disruption", "system outage", "network breach", "cyber incident"],
    ),
    (
        RiskCategory::DemandShock,
        &[
            "demand surge", "orders spike", "demand collapse", "order cancellations",
            "demand crash", "booking surge",
        ],
        &[
            "inventory correction", "soft demand", "ai server demand", "ev demand spike",
            "demand volatility", "order decline",
        ],
    ),
];

const HORIZON_TRIGGERS: &[(TimeHorizon, &[&str])] = &[
    (
        TimeHorizon::Immediate,
        &[
            "effective immediately", "now", "this week", "already", "immediate", "today",
            "tomorrow", "within days", "urgent",
        ],
    ),
    (
        TimeHorizon::Near,
        &[
            "within weeks", "next month", "30-60 days", "near term", "coming weeks", "shortly",
            "soon", "next few weeks",
        ],
    ),
    (
        TimeHorizon::Medium,
        &[
            "this quarter", "next quarter", "over the coming months", "q1", "q2", "q3", "q4",
            "in the months ahead", "mid-year",
        ],
    ),
    (
        TimeHorizon::Long,
        &[
            "next year", "2026", "2027", "2028", "long term", "multi-year", "years ahead",
            "long-term", "over years",
        ],
    ),
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Strong and medium trigger phrases for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTriggers {
    pub strong: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
}

/// Lower bounds of the WATCH, HIGH and CRITICAL bands. LOW starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub watch: u8,
    pub high: u8,
    pub critical: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            watch: 30,
            high: 55,
            critical: 75,
        }
    }
}

impl BandThresholds {
    pub fn band_for(&self, score: u8) -> RiskBand {
        if score >= self.critical {
            RiskBand::Critical
        } else if score >= self.high {
            RiskBand::High
        } else if score >= self.watch {
            RiskBand::Watch
        } else {
            RiskBand::Low
        }
    }
}

/// Read-only rule set consumed by the engine.
///
/// All phrases are matched as lower-case substrings of the normalized
/// article text; [`Lexicon::normalized`] lower-cases custom tables on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub context_words: Vec<String>,
    pub component_families: Vec<String>,
    pub procurement_terms: Vec<String>,
    pub capacity_terms: Vec<String>,
    pub official_indicators: Vec<String>,
    pub credible_sources: Vec<String>,
    pub vague_indicators: Vec<String>,
    #[serde(default)]
    pub bands: BandThresholds,
    pub horizon_triggers: BTreeMap<TimeHorizon, Vec<String>>,
    pub category_triggers: BTreeMap<RiskCategory, CategoryTriggers>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let category_triggers = CATEGORY_TRIGGERS
            .iter()
            .map(|(category, strong, medium)| {
                (
                    *category,
                    CategoryTriggers {
                        strong: owned(strong),
                        medium: owned(medium),
                    },
                )
            })
            .collect();

        let horizon_triggers = HORIZON_TRIGGERS
            .iter()
            .map(|(horizon, triggers)| (*horizon, owned(triggers)))
            .collect();

        Self {
            context_words: owned(ELECTRONICS_CONTEXT_WORDS),
            component_families: owned(COMPONENT_FAMILIES),
            procurement_terms: owned(PROCUREMENT_TERMS),
            capacity_terms: owned(CAPACITY_TERMS),
            official_indicators: owned(OFFICIAL_INDICATORS),
            credible_sources: owned(CREDIBLE_SOURCES),
            vague_indicators: owned(VAGUE_INDICATORS),
            bands: BandThresholds::default(),
            horizon_triggers,
            category_triggers,
        }
    }
}

impl Lexicon {
    pub fn from_toml_str(content: &str) -> Result<Self, RiskError> {
        let lexicon: Lexicon = toml::from_str(content)?;
        lexicon.into_validated()
    }

    pub fn from_json_str(content: &str) -> Result<Self, RiskError> {
        let lexicon: Lexicon = serde_json::from_str(content)?;
        lexicon.into_validated()
    }

    /// Load a lexicon file; `.json` is read as JSON, anything else as TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RiskError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RiskError::LexiconLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let lexicon = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(
            path = %path.display(),
            categories = lexicon.category_triggers.len(),
            "Loaded risk lexicon"
        );
        Ok(lexicon)
    }

    /// Lower-cased and trimmed copy of every phrase
    pub fn normalized(mut self) -> Self {
        fn lower(words: &mut Vec<String>) {
            for word in words.iter_mut() {
                *word = word.trim().to_lowercase();
            }
        }

        lower(&mut self.context_words);
        lower(&mut self.component_families);
        lower(&mut self.procurement_terms);
        lower(&mut self.capacity_terms);
        lower(&mut self.official_indicators);
        lower(&mut self.credible_sources);
        lower(&mut self.vague_indicators);
        for triggers in self.category_triggers.values_mut() {
            lower(&mut triggers.strong);
            lower(&mut triggers.medium);
        }
        for triggers in self.horizon_triggers.values_mut() {
            lower(triggers);
        }
        self
    }

    /// Normalize then validate
    pub fn into_validated(self) -> Result<Self, RiskError> {
        let lexicon = self.normalized();
        validate_lexicon(&lexicon)?;
        Ok(lexicon)
    }

    pub fn triggers_for(&self, category: RiskCategory) -> Option<&CategoryTriggers> {
        self.category_triggers.get(&category)
    }

    pub fn to_toml_string(&self) -> Result<String, RiskError> {
        toml::to_string(self).map_err(|e| RiskError::LexiconLoad {
            path: "<memory>".to_string(),
            message: e.to_string(),
        })
    }
}
