use comfy_table::{Cell, Color};

use ccprice::pricing::{ConventionViolation, MatchSource, PricingTable, Resolution};
use ccprice::{CostBreakdown, PricingRecord};

use crate::output::format::{
    NumberFormat, create_styled_table, format_cost, format_number, format_rate, header_cell,
    right_cell, styled_cell,
};
use crate::usage::PricedRecord;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

fn source_color(source: MatchSource, use_color: bool) -> Option<Color> {
    if !use_color {
        return None;
    }
    match source {
        MatchSource::Exact => Some(Color::Green),
        MatchSource::Family => Some(Color::Yellow),
        MatchSource::Default => Some(Color::Red),
    }
}

fn model_label(model: Option<&str>) -> &str {
    model.unwrap_or("(none)")
}

/// Price per record, with a total row when there is more than one record
pub(crate) fn print_cost_table(records: &[PricedRecord], total: CostBreakdown, opts: TableOptions) {
    let fmt = opts.number_format;
    let cost_color = opts.use_color.then_some(Color::Green);

    let mut table = create_styled_table();
    let mut header = Vec::new();
    if records.len() > 1 {
        header.push(header_cell("#", opts.use_color));
    }
    header.extend(
        [
            "Model", "Priced as", "Input", "Output", "Cache W", "Cache R", "Input $", "Output $",
            "Cache W $", "Cache R $", "Total $",
        ]
        .iter()
        .map(|h| header_cell(h, opts.use_color)),
    );
    table.set_header(header);

    for record in records {
        let source = record.resolution.matched_via;
        let mut row = Vec::new();
        if records.len() > 1 {
            row.push(Cell::new(record.line));
        }
        row.push(styled_cell(model_label(record.model.as_deref()), None, false));
        row.push(styled_cell(
            &priced_as(&record.resolution),
            source_color(source, opts.use_color),
            false,
        ));
        row.extend(token_cells(record, fmt));
        row.extend(cost_cells(&record.cost, fmt, cost_color, false));
        table.add_row(row);
    }

    if records.len() > 1 {
        let mut row = vec![
            styled_cell("Total", None, true),
            Cell::new(""),
            Cell::new(""),
        ];
        let sum = |f: fn(&PricedRecord) -> i64| records.iter().map(f).fold(0, i64::saturating_add);
        row.push(right_cell(&format_number(sum(|r| r.usage.input_tokens), fmt), None, true));
        row.push(right_cell(&format_number(sum(|r| r.usage.output_tokens), fmt), None, true));
        row.push(right_cell(&format_number(sum(|r| r.usage.cache_creation()), fmt), None, true));
        row.push(right_cell(&format_number(sum(|r| r.usage.cache_read()), fmt), None, true));
        row.extend(cost_cells(&total, fmt, cost_color, true));
        table.add_row(row);
    }

    println!("{table}");
}

fn priced_as(resolution: &Resolution) -> String {
    match resolution.key {
        Some(key) => format!("{key} ({})", resolution.matched_via.as_str()),
        None => "default".to_string(),
    }
}

fn token_cells(record: &PricedRecord, fmt: NumberFormat) -> Vec<Cell> {
    [
        record.usage.input_tokens,
        record.usage.output_tokens,
        record.usage.cache_creation(),
        record.usage.cache_read(),
    ]
    .into_iter()
    .map(|n| right_cell(&format_number(n, fmt), None, false))
    .collect()
}

fn cost_cells(cost: &CostBreakdown, fmt: NumberFormat, color: Option<Color>, bold: bool) -> Vec<Cell> {
    [
        cost.input(),
        cost.output(),
        cost.cache_write(),
        cost.cache_read(),
    ]
    .into_iter()
    .map(|c| right_cell(&format_cost(c, fmt), None, bold))
    .chain(std::iter::once(right_cell(
        &format_cost(cost.total(), fmt),
        color,
        true,
    )))
    .collect()
}

fn rate_cells(record: &PricingRecord, fmt: NumberFormat) -> Vec<Cell> {
    [
        record.input_rate,
        record.output_rate,
        record.cache_write_rate,
        record.cache_read_rate,
    ]
    .into_iter()
    .map(|r| right_cell(&format_rate(r, fmt), None, false))
    .collect()
}

fn rate_header(first: &str, use_color: bool) -> Vec<Cell> {
    [first, "Input $/M", "Output $/M", "Cache W $/M", "Cache R $/M"]
        .iter()
        .map(|h| header_cell(h, use_color))
        .collect()
}

/// List every table entry, sorted by model identifier
pub(crate) fn print_models_table(pricing: &PricingTable, opts: TableOptions) {
    let mut table = create_styled_table();
    table.set_header(rate_header("Model", opts.use_color));
    for (key, record) in pricing.sorted() {
        let mut row = vec![styled_cell(key, None, false)];
        row.extend(rate_cells(&record, opts.number_format));
        table.add_row(row);
    }
    println!("{table}");
    println!("\n  {} models, prices per 1M tokens\n", pricing.len());
}

/// Show where a model identifier's pricing came from
pub(crate) fn print_resolution(
    model: Option<&str>,
    resolution: &Resolution,
    pattern: Option<&str>,
    opts: TableOptions,
) {
    let detail = match (resolution.matched_via, pattern) {
        (MatchSource::Family, Some(pattern)) => format!("family (contains \"{pattern}\")"),
        (source, _) => source.as_str().to_string(),
    };

    let mut table = create_styled_table();
    table.set_header(rate_header("Model", opts.use_color));
    let mut row = vec![styled_cell(model_label(model), None, true)];
    row.extend(rate_cells(&resolution.record, opts.number_format));
    table.add_row(row);
    println!("{table}");

    let target = resolution.key.unwrap_or("default record");
    if opts.use_color {
        println!("\n  Matched via \x1b[36m{detail}\x1b[0m -> {target}\n");
    } else {
        println!("\n  Matched via {detail} -> {target}\n");
    }
}

/// Report entries that break the cache rate convention
pub(crate) fn print_audit(
    violations: &[ConventionViolation],
    checked: usize,
    tolerance: f64,
    opts: TableOptions,
) {
    if violations.is_empty() {
        println!("All {checked} pricing entries follow the cache rate convention.");
        return;
    }

    let fmt = opts.number_format;
    let warn = opts.use_color.then_some(Color::Red);
    let mut table = create_styled_table();
    table.set_header(
        [
            "Model",
            "Input $/M",
            "Cache W $/M",
            "Expected W",
            "Cache R $/M",
            "Expected R",
        ]
        .iter()
        .map(|h| header_cell(h, opts.use_color))
        .collect::<Vec<_>>(),
    );
    for v in violations {
        let write_color = if v.cache_write_off(tolerance) { warn } else { None };
        let read_color = if v.cache_read_off(tolerance) { warn } else { None };
        table.add_row(vec![
            styled_cell(v.key, None, false),
            right_cell(&format_rate(v.record.input_rate, fmt), None, false),
            right_cell(&format_rate(v.record.cache_write_rate, fmt), write_color, false),
            right_cell(&format_rate(v.expected_cache_write, fmt), None, false),
            right_cell(&format_rate(v.record.cache_read_rate, fmt), read_color, false),
            right_cell(&format_rate(v.expected_cache_read, fmt), None, false),
        ]);
    }
    println!("{table}");
    println!(
        "\n  {} of {} entries break the convention (cache write = input x 1.25, cache read = input x 0.10)\n",
        violations.len(),
        checked
    );
}
