//! Model pricing: the static price table, model resolution and cost arithmetic.

mod calculator;
mod resolver;
mod table;
mod types;

pub use calculator::{calculate_cost, calculate_cost_with};
pub use resolver::{FAMILY_RULES, FamilyRule, get_model_pricing, matching_family_rule, resolve_model};
pub use table::{
    CACHE_READ_MULTIPLIER, CACHE_WRITE_MULTIPLIER, ConventionViolation, DEFAULT_RECORD,
    PricingTable,
};
pub use types::{
    CostBreakdown, MatchSource, PricingRecord, Resolution, TOKENS_PER_MILLION, UsageTokens,
};
