use super::resolver::get_model_pricing;
use super::types::{CostBreakdown, PricingRecord, TOKENS_PER_MILLION, UsageTokens};

fn component_cost(tokens: i64, rate_per_million: f64) -> f64 {
    (tokens as f64 / TOKENS_PER_MILLION) * rate_per_million
}

/// Price `usage` with an already-resolved record.
///
/// Counts are not validated: negative tokens yield negative components.
pub fn calculate_cost_with(usage: &UsageTokens, pricing: &PricingRecord) -> CostBreakdown {
    CostBreakdown::from_components(
        component_cost(usage.input_tokens, pricing.input_rate),
        component_cost(usage.output_tokens, pricing.output_rate),
        component_cost(usage.cache_creation(), pricing.cache_write_rate),
        component_cost(usage.cache_read(), pricing.cache_read_rate),
    )
}

/// Cost of `usage` for `model`, priced from the built-in table
pub fn calculate_cost(usage: &UsageTokens, model: Option<&str>) -> CostBreakdown {
    calculate_cost_with(usage, &get_model_pricing(model))
}
