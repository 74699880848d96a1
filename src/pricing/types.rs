//! Pricing data types
//!
//! Rates are currency units per 1M tokens. Token counts are signed so that
//! bad upstream data flows through the arithmetic instead of being rejected.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Number of tokens a per-million rate is denominated in.
pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Model pricing info (per million tokens)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecord {
    pub input_rate: f64,
    pub output_rate: f64,
    pub cache_write_rate: f64,
    pub cache_read_rate: f64,
}

impl PricingRecord {
    pub const fn new(
        input_rate: f64,
        output_rate: f64,
        cache_write_rate: f64,
        cache_read_rate: f64,
    ) -> Self {
        Self {
            input_rate,
            output_rate,
            cache_write_rate,
            cache_read_rate,
        }
    }
}

/// Token counts reported by the API for a single invocation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTokens {
    pub input_tokens: i64,
    pub output_tokens: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<i64>,
}

impl UsageTokens {
    pub fn new(input_tokens: i64, output_tokens: i64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            ..Self::default()
        }
    }

    pub fn with_cache(mut self, creation: i64, read: i64) -> Self {
        self.cache_creation_input_tokens = Some(creation);
        self.cache_read_input_tokens = Some(read);
        self
    }

    pub fn cache_creation(&self) -> i64 {
        self.cache_creation_input_tokens.unwrap_or(0)
    }

    pub fn cache_read(&self) -> i64 {
        self.cache_read_input_tokens.unwrap_or(0)
    }

    /// Total tokens for display purposes, saturating at the `i64` bounds
    pub fn total_tokens(&self) -> i64 {
        [self.output_tokens, self.cache_creation(), self.cache_read()]
            .into_iter()
            .fold(self.input_tokens, i64::saturating_add)
    }
}

/// Itemized cost of one or more invocations.
///
/// Fields are private so that `total` can only be derived from the four
/// components; `total == input + output + cache_write + cache_read` holds
/// bit-for-bit for every value of this type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    total: f64,
    input: f64,
    output: f64,
    cache_write: f64,
    cache_read: f64,
}

impl CostBreakdown {
    pub fn from_components(input: f64, output: f64, cache_write: f64, cache_read: f64) -> Self {
        Self {
            total: input + output + cache_write + cache_read,
            input,
            output,
            cache_write,
            cache_read,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn input(&self) -> f64 {
        self.input
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn cache_write(&self) -> f64 {
        self.cache_write
    }

    pub fn cache_read(&self) -> f64 {
        self.cache_read
    }
}

impl Add for CostBreakdown {
    type Output = CostBreakdown;

    fn add(self, other: CostBreakdown) -> CostBreakdown {
        CostBreakdown::from_components(
            self.input + other.input,
            self.output + other.output,
            self.cache_write + other.cache_write,
            self.cache_read + other.cache_read,
        )
    }
}

impl Sum for CostBreakdown {
    fn sum<I: Iterator<Item = CostBreakdown>>(iter: I) -> Self {
        iter.fold(CostBreakdown::default(), Add::add)
    }
}

/// How a model identifier was mapped to its pricing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Identifier is a key of the pricing table
    Exact,
    /// Identifier matched one of the family substring rules
    Family,
    /// Nothing matched, or no identifier was given
    Default,
}

impl MatchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchSource::Exact => "exact",
            MatchSource::Family => "family",
            MatchSource::Default => "default",
        }
    }
}

/// Pricing record together with how it was found
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub record: PricingRecord,
    pub matched_via: MatchSource,
    /// Table key that supplied the record; `None` for the default fallback
    pub key: Option<&'static str>,
}
