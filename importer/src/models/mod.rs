//! Domain models for the import pipeline.
//!
//! Each record struct serializes to exactly the JSON row the backend
//! expects, field names included:
//!
//! - [`TamAccount`] - `tam_accounts`
//! - [`Goal`] - `goals`
//! - [`AccountPlan`] - `account_plans`
//! - [`Pursuit`] - `pursuits`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Tables
// =============================================================================

/// Backend tables written by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    TamAccounts,
    Goals,
    AccountPlans,
    Pursuits,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TamAccounts => "tam_accounts",
            Self::Goals => "goals",
            Self::AccountPlans => "account_plans",
            Self::Pursuits => "pursuits",
        }
    }

    /// Primary key column returned on insert.
    pub fn id_column(&self) -> &'static str {
        match self {
            Self::TamAccounts => "tam_account_id",
            Self::Goals => "goal_id",
            Self::AccountPlans => "account_plan_id",
            Self::Pursuits => "pursuit_id",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Vocabulary
// =============================================================================

/// Market vertical of a TAM account or goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    #[serde(rename = "Medical Device")]
    MedicalDevice,
    #[serde(rename = "CRA/Regulatory")]
    CraRegulatory,
    Automotive,
    Industrial,
}

impl Vertical {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MedicalDevice => "Medical Device",
            Self::CraRegulatory => "CRA/Regulatory",
            Self::Automotive => "Automotive",
            Self::Industrial => "Industrial",
        }
    }
}

/// Account fit tier derived from a priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitTier {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Revenue,
    Strategic,
    NewBusiness,
    NewLogos,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Company,
    Sales,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    #[serde(rename = "Asia Pacific")]
    AsiaPacific,
}

/// Canonical pursuit stage.
///
/// Probability is a pure function of the stage, see [`Stage::probability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Discovery,
    Qualification,
    Demo,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Self::Discovery,
        Self::Qualification,
        Self::Demo,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "Discovery",
            Self::Qualification => "Qualification",
            Self::Demo => "Demo",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// Parse a canonical stage name (exact match).
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Win probability in percent.
    pub fn probability(&self) -> u8 {
        match self {
            Self::Discovery => 10,
            Self::Qualification => 20,
            Self::Demo => 40,
            Self::Proposal => 60,
            Self::Negotiation => 80,
            Self::ClosedWon => 100,
            Self::ClosedLost => 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuitType {
    Renewal,
    Expansion,
    Recurring,
    NewBusiness,
}

// =============================================================================
// Records
// =============================================================================

/// Status given to every imported TAM account.
pub const TAM_DEFAULT_STATUS: &str = "New";

/// Account type given to account plans created by the pipeline import.
pub const PROSPECT_ACCOUNT_TYPE: &str = "Prospect";

/// A total-addressable-market account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TamAccount {
    pub company_name: String,
    pub vertical: Vertical,
    pub headquarters: Option<String>,
    pub employee_count: Option<String>,
    pub fit_tier: Option<FitTier>,
    pub fit_rationale: Option<String>,
    pub company_summary: Option<String>,
    pub status: String,
    pub estimated_deal_value: Option<f64>,
}

/// A company or sales goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub goal_type: GoalType,
    pub category: GoalCategory,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vertical: Option<Vertical>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<Region>,
    pub target_value: f64,
    pub target_year: i32,
    pub current_value: f64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_goal_id: Option<String>,
}

/// A company-level plan that pursuits hang off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPlan {
    pub account_name: String,
    pub account_type: String,
    pub vertical: Option<String>,
}

impl AccountPlan {
    pub fn prospect(account_name: impl Into<String>, vertical: Option<String>) -> Self {
        Self {
            account_name: account_name.into(),
            account_type: PROSPECT_ACCOUNT_TYPE.to_string(),
            vertical,
        }
    }
}

/// A deal linked to one account plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuit {
    pub account_plan_id: Option<String>,
    pub name: String,
    pub stage: Stage,
    pub probability: u8,
    pub estimated_value: Option<f64>,
    pub deal_owner: Option<String>,
    pub deal_type: Option<String>,
    pub target_quarter: Option<String>,
    pub target_close_date: Option<NaiveDate>,
    pub pursuit_type: PursuitType,
}
