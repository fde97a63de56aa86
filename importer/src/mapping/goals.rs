//! Heuristics that turn free-text goals and KPIs into typed goal fields.
//!
//! The goals workbook states targets in prose ("Close $2.5M in NA medical
//! device bookings"), so each field is recognized from a handful of
//! markers. Matching is deliberately literal: some markers are
//! case-sensitive (`CRA`, `NA `, `Non-Automotive`, `10 New`).

use crate::models::{GoalType, Region, Vertical};

/// Target assumed for company goals that state no amount.
pub const DEFAULT_COMPANY_TARGET: f64 = 10_000_000.0;

fn has_amount(text: &str, marker: &str) -> bool {
    text.contains(marker) || text.to_lowercase().contains(&marker.to_lowercase())
}

/// Target value of a company-level goal.
pub fn company_goal_target(text: &str) -> f64 {
    if has_amount(text, "$10M") {
        10_000_000.0
    } else if has_amount(text, "$500K") {
        500_000.0
    } else {
        DEFAULT_COMPANY_TARGET
    }
}

/// Type of a company-level goal.
pub fn company_goal_type(text: &str) -> GoalType {
    let lower = text.to_lowercase();
    if lower.contains("partnership") || lower.contains("agreement") {
        GoalType::Strategic
    } else if lower.contains("non-automotive") {
        GoalType::NewBusiness
    } else {
        GoalType::Revenue
    }
}

/// Target value of a sales KPI; `text` is the KPI name and description.
pub fn kpi_target(text: &str) -> f64 {
    if has_amount(text, "$2.5M") {
        2_500_000.0
    } else if has_amount(text, "$500K") {
        500_000.0
    } else if text.contains("10 New") {
        10.0
    } else if has_amount(text, "$1M") {
        1_000_000.0
    } else {
        0.0
    }
}

/// Type of a sales KPI, judged from its name only.
pub fn kpi_goal_type(kpi_name: &str) -> GoalType {
    if kpi_name.to_lowercase().contains("logo") {
        GoalType::NewLogos
    } else if kpi_name.contains("Non-Automotive") {
        GoalType::NewBusiness
    } else if kpi_name.contains("Pipeline") {
        GoalType::Pipeline
    } else {
        GoalType::Revenue
    }
}

/// Vertical mentioned in a KPI's name or description.
pub fn kpi_vertical(text: &str) -> Option<Vertical> {
    let lower = text.to_lowercase();
    if lower.contains("medical") {
        Some(Vertical::MedicalDevice)
    } else if lower.contains("automotive") {
        Some(Vertical::Automotive)
    } else if text.contains("CRA") {
        Some(Vertical::CraRegulatory)
    } else {
        None
    }
}

/// Region mentioned in a KPI's name or description.
pub fn kpi_region(text: &str) -> Option<Region> {
    if text.contains("NA ") || text.contains("North America") {
        Some(Region::NorthAmerica)
    } else if text.contains("EU ") || text.contains("Europe") {
        Some(Region::Europe)
    } else if text.contains("AP ") || text.contains("Asia") {
        Some(Region::AsiaPacific)
    } else {
        None
    }
}
