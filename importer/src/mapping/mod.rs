//! Normalization and vocabulary mapping rules.
//!
//! Every function here is pure and total: unknown input maps to a
//! documented default instead of an error.
//!
//! - [`normalize`] - cell value cleaning (revenue, employees, tiers)
//! - [`categorical`] - deal stage, probability and pursuit type tables
//! - [`quarter`] - "Q2 2027" style strings to end-of-quarter dates
//! - [`goals`] - goal type / target / vertical / region heuristics

pub mod categorical;
pub mod goals;
pub mod normalize;
pub mod quarter;

pub use categorical::{map_deal_stage, map_deal_type_to_pursuit_type, map_stage_to_probability};
pub use normalize::{clean_employees, clean_revenue, map_priority_to_tier, truncate_chars};
pub use quarter::{parse_quarter_to_date, parse_quarter_with_fallback};
