//! Cost accounting for Claude API token usage.
//!
//! Resolve a model identifier to its per-million-token rates and turn the
//! usage counts reported by the API into an itemized [`CostBreakdown`].
//!
//! ```
//! use ccprice::{UsageTokens, calculate_cost};
//!
//! let usage = UsageTokens::new(1_000_000, 0);
//! let cost = calculate_cost(&usage, Some("claude-3-opus-20240229"));
//! assert_eq!(cost.total(), 15.0);
//! ```

pub mod pricing;

pub use pricing::{
    CostBreakdown, DEFAULT_RECORD, MatchSource, PricingRecord, PricingTable, Resolution,
    UsageTokens, calculate_cost, calculate_cost_with, get_model_pricing, resolve_model,
};
