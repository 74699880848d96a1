use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::PricingRecord;

/// Fallback for unrecognized or missing model identifiers (Sonnet-class pricing)
pub const DEFAULT_RECORD: PricingRecord = PricingRecord::new(3.0, 15.0, 3.75, 0.30);

/// Conventional cache write rate relative to the input rate
pub const CACHE_WRITE_MULTIPLIER: f64 = 1.25;
/// Conventional cache read rate relative to the input rate
pub const CACHE_READ_MULTIPLIER: f64 = 0.10;

const OPUS_4_5: PricingRecord = PricingRecord::new(5.0, 25.0, 6.25, 0.50);
const OPUS_4: PricingRecord = PricingRecord::new(15.0, 75.0, 18.75, 1.50);
const SONNET_4: PricingRecord = PricingRecord::new(3.0, 15.0, 3.75, 0.30);
const HAIKU_4_5: PricingRecord = PricingRecord::new(1.0, 5.0, 1.25, 0.10);
const SONNET_3_7: PricingRecord = PricingRecord::new(3.0, 15.0, 3.75, 0.30);
const SONNET_3_5: PricingRecord = PricingRecord::new(3.0, 15.0, 3.75, 0.30);
const HAIKU_3_5: PricingRecord = PricingRecord::new(0.80, 4.0, 1.0, 0.08);
const OPUS_3: PricingRecord = PricingRecord::new(15.0, 75.0, 18.75, 1.50);
const SONNET_3: PricingRecord = PricingRecord::new(3.0, 15.0, 3.75, 0.30);
const HAIKU_3: PricingRecord = PricingRecord::new(0.25, 1.25, 0.3125, 0.025);

/// Known model identifiers and their published rates (USD per 1M tokens)
const BUILTIN_ENTRIES: &[(&str, PricingRecord)] = &[
    // Claude 4.5
    ("claude-opus-4-5-20251101", OPUS_4_5),
    ("claude-opus-4-5", OPUS_4_5),
    ("claude-sonnet-4-5-20250929", SONNET_4),
    ("claude-haiku-4-5-20251001", HAIKU_4_5),
    // Claude 4 / 4.1
    ("claude-opus-4-1-20250805", OPUS_4),
    ("claude-opus-4-20250514", OPUS_4),
    ("claude-sonnet-4-20250514", SONNET_4),
    // Claude 3.7
    ("claude-3-7-sonnet-20250219", SONNET_3_7),
    // Claude 3.5
    ("claude-3-5-sonnet-20241022", SONNET_3_5),
    ("claude-3-5-sonnet-20240620", SONNET_3_5),
    ("claude-3-5-haiku-20241022", HAIKU_3_5),
    // Claude 3
    ("claude-3-opus-20240229", OPUS_3),
    ("claude-3-sonnet-20240229", SONNET_3),
    ("claude-3-haiku-20240307", HAIKU_3),
];

static BUILTIN: LazyLock<PricingTable> =
    LazyLock::new(|| PricingTable::from_entries(BUILTIN_ENTRIES.iter().copied()));

/// Read-only mapping from exact model identifier to pricing record
#[derive(Debug, Default, Clone)]
pub struct PricingTable {
    models: HashMap<&'static str, PricingRecord>,
}

/// Table entry whose cache rates stray from the documented multipliers
#[derive(Debug, Clone, PartialEq)]
pub struct ConventionViolation {
    pub key: &'static str,
    pub record: PricingRecord,
    pub expected_cache_write: f64,
    pub expected_cache_read: f64,
}

impl ConventionViolation {
    pub fn cache_write_off(&self, tolerance: f64) -> bool {
        (self.record.cache_write_rate - self.expected_cache_write).abs() > tolerance
    }

    pub fn cache_read_off(&self, tolerance: f64) -> bool {
        (self.record.cache_read_rate - self.expected_cache_read).abs() > tolerance
    }
}

impl PricingTable {
    /// The process-wide table, built on first use
    pub fn builtin() -> &'static PricingTable {
        &BUILTIN
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, PricingRecord)>,
    {
        Self {
            models: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, model: &str) -> Option<&PricingRecord> {
        self.models.get(model)
    }

    /// Look up an entry and hand back the table's own `'static` key with it.
    pub(super) fn get_key_value(&self, model: &str) -> Option<(&'static str, PricingRecord)> {
        self.models
            .get_key_value(model)
            .map(|(key, record)| (*key, *record))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PricingRecord)> + '_ {
        self.models.iter().map(|(key, record)| (*key, record))
    }

    /// Entries sorted by key, for stable display
    pub fn sorted(&self) -> Vec<(&'static str, PricingRecord)> {
        let mut entries: Vec<_> = self.iter().map(|(key, record)| (key, *record)).collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Report entries whose cache rates are not `input × 1.25` / `input × 0.10`.
    ///
    /// The table is left as is; fixing a flagged entry is up to whoever
    /// maintains the price list.
    pub fn convention_violations(&self, tolerance: f64) -> Vec<ConventionViolation> {
        let mut violations: Vec<ConventionViolation> = self
            .iter()
            .filter_map(|(key, record)| {
                let violation = ConventionViolation {
                    key,
                    record: *record,
                    expected_cache_write: record.input_rate * CACHE_WRITE_MULTIPLIER,
                    expected_cache_read: record.input_rate * CACHE_READ_MULTIPLIER,
                };
                (violation.cache_write_off(tolerance) || violation.cache_read_off(tolerance))
                    .then_some(violation)
            })
            .collect();
        violations.sort_by(|a, b| a.key.cmp(b.key));
        violations
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn default_record_is_sonnet_class() {
        assert_eq!(DEFAULT_RECORD.input_rate, 3.0);
        assert_eq!(DEFAULT_RECORD.output_rate, 15.0);
        assert_eq!(DEFAULT_RECORD.cache_write_rate, 3.75);
        assert_eq!(DEFAULT_RECORD.cache_read_rate, 0.30);
    }

    #[test]
    fn builtin_contains_every_entry() {
        let table = PricingTable::builtin();
        assert_eq!(table.len(), BUILTIN_ENTRIES.len());
        for (key, record) in BUILTIN_ENTRIES {
            assert_eq!(table.get(key), Some(record), "{key}");
        }
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(PricingTable::builtin(), PricingTable::builtin()));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = PricingTable::builtin();
        assert!(table.get("claude-3-opus-20240229").is_some());
        assert!(table.get("CLAUDE-3-OPUS-20240229").is_none());
    }

    #[test]
    fn builtin_follows_cache_conventions() {
        let violations = PricingTable::builtin().convention_violations(TOLERANCE);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn builtin_rates_are_non_negative() {
        for (key, r) in PricingTable::builtin().iter() {
            assert!(
                r.input_rate >= 0.0
                    && r.output_rate >= 0.0
                    && r.cache_write_rate >= 0.0
                    && r.cache_read_rate >= 0.0,
                "{key}"
            );
        }
    }

    #[test]
    fn convention_violation_is_reported_not_fixed() {
        let broken = PricingRecord::new(2.0, 10.0, 3.0, 0.2);
        let table = PricingTable::from_entries([("ok-model", SONNET_3), ("odd-model", broken)]);

        let violations = table.convention_violations(TOLERANCE);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.key, "odd-model");
        assert_eq!(v.expected_cache_write, 2.5);
        assert!(v.cache_write_off(TOLERANCE));
        assert!(!v.cache_read_off(TOLERANCE));

        assert_eq!(table.get("odd-model"), Some(&broken));
    }

    #[test]
    fn sorted_orders_by_key() {
        let table = PricingTable::from_entries([("b", OPUS_3), ("a", HAIKU_3), ("c", SONNET_3)]);
        let keys: Vec<_> = table.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_table() {
        let table = PricingTable::default();
        assert!(table.is_empty());
        assert!(table.convention_violations(TOLERANCE).is_empty());
    }
}
