pub(crate) mod debug;

pub(crate) use debug::{debug_note, family_pattern, resolution_note, set_debug};
