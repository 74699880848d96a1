use super::table::{DEFAULT_RECORD, PricingTable};
use super::types::{MatchSource, PricingRecord, Resolution};

/// Substring rule mapping a model family to the table entry that prices it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyRule {
    /// Any of these (lowercase) substrings selects the rule
    pub patterns: &'static [&'static str],
    /// Table key of the record the family resolves to
    pub target: &'static str,
}

impl FamilyRule {
    /// Whether `model` contains any of the rule's patterns, ignoring case
    pub fn matches(&self, model: &str) -> bool {
        self.matched_pattern(model).is_some()
    }

    /// First pattern found in `model` (ignoring case), for diagnostics
    pub fn matched_pattern(&self, model: &str) -> Option<&'static str> {
        self.find_pattern(&model.to_lowercase())
    }

    fn find_pattern(&self, model_lower: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .copied()
            .find(|p| model_lower.contains(p))
    }
}

/// Family fallbacks, highest priority first. The first rule that matches wins.
///
/// A bare "sonnet" resolves to 3.5 pricing; `claude-3-sonnet-20240229` is
/// only reachable by exact match.
pub const FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule {
        patterns: &["opus-4", "opus-4.5"],
        target: "claude-opus-4-5-20251101",
    },
    FamilyRule {
        patterns: &["sonnet-4"],
        target: "claude-sonnet-4-20250514",
    },
    FamilyRule {
        patterns: &["3-5-sonnet", "3.5-sonnet"],
        target: "claude-3-5-sonnet-20241022",
    },
    FamilyRule {
        patterns: &["3-5-haiku", "3.5-haiku"],
        target: "claude-3-5-haiku-20241022",
    },
    FamilyRule {
        patterns: &["opus"],
        target: "claude-3-opus-20240229",
    },
    FamilyRule {
        patterns: &["haiku"],
        target: "claude-3-haiku-20240307",
    },
    FamilyRule {
        patterns: &["sonnet"],
        target: "claude-3-5-sonnet-20241022",
    },
];

/// First family rule matching `model`, compared case-insensitively
pub fn matching_family_rule(model: &str) -> Option<&'static FamilyRule> {
    let model_lower = model.to_lowercase();
    FAMILY_RULES
        .iter()
        .find(|rule| rule.find_pattern(&model_lower).is_some())
}

impl PricingTable {
    /// Resolve `model` to a pricing record: exact key, then family rule, then default.
    pub fn resolve(&self, model: Option<&str>) -> Resolution {
        let Some(model) = model else {
            return default_resolution();
        };

        if let Some((key, record)) = self.get_key_value(model) {
            return Resolution {
                record,
                matched_via: MatchSource::Exact,
                key: Some(key),
            };
        }

        // Only the first matching rule is consulted. If its target is not in
        // this table the model gets the default record.
        matching_family_rule(model)
            .and_then(|rule| self.get_key_value(rule.target))
            .map(|(key, record)| Resolution {
                record,
                matched_via: MatchSource::Family,
                key: Some(key),
            })
            .unwrap_or_else(default_resolution)
    }

    pub fn pricing(&self, model: Option<&str>) -> PricingRecord {
        self.resolve(model).record
    }
}

fn default_resolution() -> Resolution {
    Resolution {
        record: DEFAULT_RECORD,
        matched_via: MatchSource::Default,
        key: None,
    }
}

/// Resolve against the built-in table, reporting how the record was found
pub fn resolve_model(model: Option<&str>) -> Resolution {
    PricingTable::builtin().resolve(model)
}

/// Pricing record for `model` from the built-in table. Never fails: unknown
/// or missing identifiers get [`DEFAULT_RECORD`].
pub fn get_model_pricing(model: Option<&str>) -> PricingRecord {
    resolve_model(model).record
}
