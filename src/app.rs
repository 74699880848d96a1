use ccprice::pricing::{MatchSource, PricingTable};
use ccprice::{CostBreakdown, UsageTokens, calculate_cost_with, resolve_model};

use crate::cli::{Cli, Commands, CostArgs};
use crate::error::AppError;
use crate::output::{
    NumberFormat, TableOptions, output_audit_json, output_cost_json, output_models_json,
    output_resolution_json, print_audit, print_cost_table, print_models_table, print_resolution,
};
use crate::usage::{PricedRecord, UsageRecord, read_usage};
use crate::utils::{debug_note, family_pattern, resolution_note};

/// Allowed drift between a cache rate and its conventional multiple of the input rate
const AUDIT_TOLERANCE: f64 = 1e-9;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) options: TableOptions,
}

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let ctx = CommandContext {
        cli,
        options: TableOptions {
            use_color: cli.use_color(),
            number_format: NumberFormat::from_locale(cli.locale.as_deref())?,
        },
    };

    match cli.command() {
        Commands::Cost(args) => handle_cost(&args, &ctx),
        Commands::Resolve { model } => {
            handle_resolve(model.as_deref().or(cli.model.as_deref()), &ctx)
        }
        Commands::Models => {
            handle_models(&ctx);
            Ok(())
        }
        Commands::Audit => handle_audit(&ctx),
    }
}

/// Resolve and price one usage record. The record's own model wins over `fallback_model`.
pub(crate) fn price_record(
    record: UsageRecord,
    fallback_model: Option<&str>,
    strict: bool,
) -> Result<PricedRecord, AppError> {
    let model = record.model.or_else(|| fallback_model.map(str::to_string));
    let resolution = resolve_model(model.as_deref());
    debug_note(|| resolution_note(model.as_deref(), &resolution));

    if strict && resolution.matched_via == MatchSource::Default {
        return Err(AppError::UnresolvedModel {
            model: model.unwrap_or_else(|| "(none)".to_string()),
        });
    }

    let cost = calculate_cost_with(&record.usage, &resolution.record);
    Ok(PricedRecord {
        model,
        line: record.line,
        usage: record.usage,
        resolution,
        cost,
    })
}

fn usage_from_flags(args: &CostArgs) -> UsageRecord {
    UsageRecord {
        model: None,
        usage: UsageTokens {
            input_tokens: args.input,
            output_tokens: args.output,
            cache_creation_input_tokens: args.cache_write,
            cache_read_input_tokens: args.cache_read,
        },
        line: 1,
    }
}

fn handle_cost(args: &CostArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let records = match &args.usage {
        Some(path) => read_usage(path)?,
        None => vec![usage_from_flags(args)],
    };

    let priced = records
        .into_iter()
        .map(|record| price_record(record, ctx.cli.model.as_deref(), ctx.cli.strict))
        .collect::<Result<Vec<_>, _>>()?;
    let total: CostBreakdown = priced.iter().map(|r| r.cost).sum();

    debug_note(|| format!("Priced {} usage records", priced.len()));

    if ctx.cli.json {
        println!("{}", output_cost_json(&priced, &total));
    } else {
        print_cost_table(&priced, total, ctx.options);
    }
    Ok(())
}

fn handle_resolve(model: Option<&str>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let resolution = resolve_model(model);
    debug_note(|| resolution_note(model, &resolution));

    if ctx.cli.strict && resolution.matched_via == MatchSource::Default {
        return Err(AppError::UnresolvedModel {
            model: model.unwrap_or("(none)").to_string(),
        });
    }

    let pattern = match resolution.matched_via {
        MatchSource::Family => model.and_then(family_pattern),
        _ => None,
    };
    if ctx.cli.json {
        println!("{}", output_resolution_json(model, &resolution, pattern));
    } else {
        print_resolution(model, &resolution, pattern, ctx.options);
    }
    Ok(())
}

fn handle_models(ctx: &CommandContext<'_>) {
    let pricing = PricingTable::builtin();
    if ctx.cli.json {
        println!("{}", output_models_json(pricing));
    } else {
        print_models_table(pricing, ctx.options);
    }
}

fn handle_audit(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let pricing = PricingTable::builtin();
    let violations = pricing.convention_violations(AUDIT_TOLERANCE);

    if ctx.cli.json {
        println!("{}", output_audit_json(&violations, pricing.len()));
    } else {
        print_audit(&violations, pricing.len(), AUDIT_TOLERANCE, ctx.options);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::ConventionViolations {
            count: violations.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn record(model: Option<&str>, usage: UsageTokens) -> UsageRecord {
        UsageRecord {
            model: model.map(str::to_string),
            usage,
            line: 1,
        }
    }

    #[test]
    fn record_model_beats_fallback() {
        let priced = price_record(
            record(Some("claude-3-opus-20240229"), UsageTokens::new(1_000_000, 0)),
            Some("claude-3-haiku-20240307"),
            false,
        )
        .unwrap();
        assert_eq!(priced.model.as_deref(), Some("claude-3-opus-20240229"));
        assert_eq!(priced.cost.total(), 15.0);
    }

    #[test]
    fn fallback_model_used_when_record_has_none() {
        let priced = price_record(
            record(None, UsageTokens::new(1_000_000, 0)),
            Some("claude-3-haiku-20240307"),
            false,
        )
        .unwrap();
        assert_eq!(priced.resolution.matched_via, MatchSource::Exact);
        assert_eq!(priced.cost.total(), 0.25);
    }

    #[test]
    fn unknown_model_priced_at_default_when_lenient() {
        let priced = price_record(
            record(Some("gpt-4o"), UsageTokens::new(1_000_000, 0)),
            None,
            false,
        )
        .unwrap();
        assert_eq!(priced.resolution.matched_via, MatchSource::Default);
        assert_eq!(priced.cost.total(), 3.0);
    }

    #[test]
    fn strict_rejects_unknown_model() {
        let err = price_record(record(Some("gpt-4o"), UsageTokens::new(1, 1)), None, true)
            .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedModel { ref model } if model == "gpt-4o"));
    }

    #[test]
    fn strict_rejects_missing_model() {
        let err = price_record(record(None, UsageTokens::new(1, 1)), None, true).unwrap_err();
        assert!(matches!(err, AppError::UnresolvedModel { ref model } if model == "(none)"));
    }

    #[test]
    fn strict_accepts_family_match() {
        let priced =
            price_record(record(Some("claude-3.5-haiku"), UsageTokens::new(1, 1)), None, true)
                .unwrap();
        assert_eq!(priced.resolution.matched_via, MatchSource::Family);
    }

    #[test]
    fn flags_keep_absent_cache_fields_absent() {
        let args = CostArgs {
            input: 10,
            output: 5,
            cache_write: None,
            cache_read: Some(3),
            usage: None,
        };
        let usage = usage_from_flags(&args).usage;
        assert_eq!(usage.cache_creation_input_tokens, None);
        assert_eq!(usage.cache_read(), 3);
    }
}
