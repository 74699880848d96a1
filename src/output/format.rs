use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = locale else {
            return Ok(NumberFormat::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(NumberFormat::default());
        }
        let base = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        let format = match base.as_str() {
            "de" => NumberFormat {
                group_sep: '.',
                decimal_sep: ',',
            },
            "fr" | "ru" => NumberFormat {
                group_sep: ' ',
                decimal_sep: ',',
            },
            "en" | "zh" => NumberFormat::default(),
            _ => {
                return Err(AppError::UnsupportedLocale {
                    input: trimmed.to_string(),
                });
            }
        };

        Ok(format)
    }
}

pub(super) fn format_number(n: i64, format: NumberFormat) -> String {
    let (sign, digits) = if n < 0 {
        ("-", n.unsigned_abs().to_string())
    } else {
        ("", n.to_string())
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(format.group_sep);
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();
    format!("{sign}{formatted}")
}

/// Currency amount with four decimals, e.g. "$0.6375"
pub(super) fn format_cost(cost: f64, format: NumberFormat) -> String {
    if !cost.is_finite() {
        return "N/A".to_string();
    }
    let sign = if cost < 0.0 { "-" } else { "" };
    let mut s = format!("{:.4}", cost.abs());
    if format.decimal_sep != '.' {
        s = s.replace('.', &format.decimal_sep.to_string());
    }
    format!("{sign}${s}")
}

/// Per-million rate, trimmed of trailing zeros: 3, 0.3, 0.3125
pub(super) fn format_rate(rate: f64, format: NumberFormat) -> String {
    let s = format!("{rate:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if format.decimal_sep != '.' {
        s.replace('.', &format.decimal_sep.to_string())
    } else {
        s.to_string()
    }
}

pub(super) fn cost_json_value(cost: f64) -> serde_json::Value {
    if cost.is_finite() {
        serde_json::json!(cost)
    } else {
        serde_json::Value::Null
    }
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    styled_cell(text, color, bold).set_alignment(CellAlignment::Right)
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_with_commas() {
        let fmt = NumberFormat::default();
        assert_eq!(format_number(0, fmt), "0");
        assert_eq!(format_number(999, fmt), "999");
        assert_eq!(format_number(1000, fmt), "1,000");
        assert_eq!(format_number(1_234_567, fmt), "1,234,567");
    }

    #[test]
    fn format_number_negative() {
        let fmt = NumberFormat::default();
        assert_eq!(format_number(-1234, fmt), "-1,234");
        assert_eq!(format_number(i64::MIN, fmt), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn format_cost_four_decimals() {
        let fmt = NumberFormat::default();
        assert_eq!(format_cost(0.6375, fmt), "$0.6375");
        assert_eq!(format_cost(15.0, fmt), "$15.0000");
        assert_eq!(format_cost(-3.0, fmt), "-$3.0000");
    }

    #[test]
    fn format_cost_non_finite() {
        let fmt = NumberFormat::default();
        assert_eq!(format_cost(f64::NAN, fmt), "N/A");
        assert_eq!(format_cost(f64::INFINITY, fmt), "N/A");
    }

    #[test]
    fn format_cost_de_locale() {
        let fmt = NumberFormat::from_locale(Some("de")).unwrap();
        assert_eq!(format_cost(1.5, fmt), "$1,5000");
    }

    #[test]
    fn format_rate_trims_zeros() {
        let fmt = NumberFormat::default();
        assert_eq!(format_rate(3.0, fmt), "3");
        assert_eq!(format_rate(0.3, fmt), "0.3");
        assert_eq!(format_rate(0.3125, fmt), "0.3125");
        assert_eq!(format_rate(18.75, fmt), "18.75");
    }

    #[test]
    fn cost_json_value_non_finite_is_null() {
        assert_eq!(cost_json_value(f64::NAN), serde_json::Value::Null);
        assert_eq!(cost_json_value(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn from_locale_none_returns_default() {
        let fmt = NumberFormat::from_locale(None).unwrap();
        assert_eq!(format_number(1000, fmt), "1,000");
    }

    #[test]
    fn from_locale_with_region_suffix() {
        let fmt = NumberFormat::from_locale(Some("de-DE")).unwrap();
        assert_eq!(format_number(1000, fmt), "1.000");
    }

    #[test]
    fn from_locale_fr_uses_space_separator() {
        let fmt = NumberFormat::from_locale(Some("fr")).unwrap();
        assert_eq!(format_number(1000, fmt), "1 000");
    }

    #[test]
    fn from_locale_unsupported_returns_error() {
        assert!(NumberFormat::from_locale(Some("ja")).is_err());
    }
}
