mod format;
mod json;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::{
    output_audit_json, output_cost_json, output_models_json, output_resolution_json,
};
pub(crate) use table::{
    TableOptions, print_audit, print_cost_table, print_models_table, print_resolution,
};
