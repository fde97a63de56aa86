//! Lookup tables from spreadsheet vocabulary to the fixed pursuit schema.

use crate::models::{PursuitType, Stage};

/// Known stage phrases, matched after trimming and lowercasing.
///
/// The first block is the wording used in the C2A pipeline workbook.
const STAGE_TABLE: &[(&str, Stage)] = &[
    ("win", Stage::ClosedWon),
    ("purchasing engaged", Stage::Proposal),
    ("interested", Stage::Qualification),
    ("no indication (high)", Stage::Discovery),
    ("no indication (low)", Stage::Discovery),
    ("won", Stage::ClosedWon),
    ("closed won", Stage::ClosedWon),
    ("lost", Stage::ClosedLost),
    ("closed lost", Stage::ClosedLost),
    ("negotiate", Stage::Negotiation),
    ("negotiation", Stage::Negotiation),
    ("proposal", Stage::Proposal),
    ("demo", Stage::Demo),
    ("qualification", Stage::Qualification),
    ("discovery", Stage::Discovery),
    ("prospect", Stage::Discovery),
    ("lead", Stage::Discovery),
];

const RENEWAL_KEYWORDS: &[&str] = &[
    "renewal",
    "renew",
    "recurring",
    "maintenance",
    "support",
    "subscription",
];

const EXPANSION_KEYWORDS: &[&str] = &["expansion", "upsell", "cross-sell", "add-on", "upgrade"];

/// Probability used for anything that is not a canonical stage name.
const UNKNOWN_STAGE_PROBABILITY: u8 = 10;

/// Map a spreadsheet deal stage to a canonical stage. Unknown → Discovery.
pub fn map_deal_stage(stage: Option<&str>) -> Stage {
    let Some(stage) = stage else {
        return Stage::Discovery;
    };
    let normalized = stage.trim().to_lowercase();

    STAGE_TABLE
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .map(|(_, stage)| *stage)
        .unwrap_or(Stage::Discovery)
}

/// Probability (percent) for a canonical stage name.
pub fn map_stage_to_probability(stage: &str) -> u8 {
    Stage::from_canonical(stage)
        .map(|s| s.probability())
        .unwrap_or(UNKNOWN_STAGE_PROBABILITY)
}

/// Classify a deal from its free-text type, falling back on the stage.
///
/// Renewal keywords win over expansion keywords; with neither, a won deal
/// is recurring business and everything else is new business.
pub fn map_deal_type_to_pursuit_type(deal_type: Option<&str>, stage: Stage) -> PursuitType {
    let deal_type = deal_type.unwrap_or("").trim().to_lowercase();

    if RENEWAL_KEYWORDS.iter().any(|k| deal_type.contains(k)) {
        return PursuitType::Renewal;
    }
    if EXPANSION_KEYWORDS.iter().any(|k| deal_type.contains(k)) {
        return PursuitType::Expansion;
    }
    if stage == Stage::ClosedWon {
        return PursuitType::Recurring;
    }
    PursuitType::NewBusiness
}
