use std::sync::atomic::{AtomicBool, Ordering};

use ccprice::pricing::{MatchSource, Resolution, matching_family_rule};

static DEBUG: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

/// Print `[DEBUG] <message>` to stderr. The message is only built when debug output is on.
pub(crate) fn debug_note(message: impl FnOnce() -> String) {
    if debug_enabled() {
        eprintln!("[DEBUG] {}", message());
    }
}

/// First family pattern found in `model`
pub(crate) fn family_pattern(model: &str) -> Option<&'static str> {
    matching_family_rule(model)?.matched_pattern(model)
}

/// One-line account of how `model` was priced
pub(crate) fn resolution_note(model: Option<&str>, resolution: &Resolution) -> String {
    let name = model.unwrap_or("(none)");
    match (resolution.matched_via, resolution.key) {
        (MatchSource::Family, Some(key)) => format!(
            "{name} -> {key} (family, contains \"{}\")",
            model.and_then(family_pattern).unwrap_or("?")
        ),
        (source, Some(key)) => format!("{name} -> {key} ({})", source.as_str()),
        (_, None) => format!("{name} -> default pricing"),
    }
}
