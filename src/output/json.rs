use serde_json::{Value, json};

use ccprice::pricing::{ConventionViolation, PricingTable, Resolution};
use ccprice::{CostBreakdown, PricingRecord};

use crate::output::format::cost_json_value;
use crate::usage::PricedRecord;

fn to_pretty(output: &Value) -> String {
    serde_json::to_string_pretty(output).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}

fn cost_json(cost: &CostBreakdown) -> Value {
    json!({
        "total": cost_json_value(cost.total()),
        "input": cost_json_value(cost.input()),
        "output": cost_json_value(cost.output()),
        "cacheWrite": cost_json_value(cost.cache_write()),
        "cacheRead": cost_json_value(cost.cache_read()),
    })
}

fn record_json(record: &PricingRecord) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

pub(crate) fn output_cost_json(records: &[PricedRecord], total: &CostBreakdown) -> String {
    let records: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "line": r.line,
                "model": r.model,
                "matchedVia": r.resolution.matched_via,
                "pricedAs": r.resolution.key,
                "usage": r.usage,
                "cost": cost_json(&r.cost),
            })
        })
        .collect();

    to_pretty(&json!({
        "records": records,
        "total": cost_json(total),
    }))
}

pub(crate) fn output_models_json(pricing: &PricingTable) -> String {
    let models: Vec<Value> = pricing
        .sorted()
        .into_iter()
        .map(|(key, record)| {
            let mut obj = record_json(&record);
            obj["model"] = json!(key);
            obj
        })
        .collect();
    to_pretty(&Value::Array(models))
}

pub(crate) fn output_resolution_json(
    model: Option<&str>,
    resolution: &Resolution,
    pattern: Option<&str>,
) -> String {
    to_pretty(&json!({
        "model": model,
        "matchedVia": resolution.matched_via,
        "pricedAs": resolution.key,
        "pattern": pattern,
        "pricing": record_json(&resolution.record),
    }))
}

pub(crate) fn output_audit_json(violations: &[ConventionViolation], checked: usize) -> String {
    let violations: Vec<Value> = violations
        .iter()
        .map(|v| {
            json!({
                "model": v.key,
                "pricing": record_json(&v.record),
                "expectedCacheWriteRate": v.expected_cache_write,
                "expectedCacheReadRate": v.expected_cache_read,
            })
        })
        .collect();
    to_pretty(&json!({
        "checked": checked,
        "violations": violations,
    }))
}
