//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::{Commands, CostArgs};

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "ccprice")]
#[command(about = "Price Claude API token usage", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Model identifier used to price usage that doesn't name one
    #[arg(short, long, global = true)]
    pub(crate) model: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Fail instead of falling back to default pricing for unknown models
    #[arg(long, global = true)]
    pub(crate) strict: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show model resolution details)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Config file to use instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.json && config.json {
            self.json = true;
        }
        if !self.strict && config.strict {
            self.strict = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // Only override color if CLI is at default
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.model.is_none() {
            self.model = config.model.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    /// Subcommand to run; bare `ccprice` prices an empty usage record
    pub(crate) fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Cost(CostArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ccprice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_defaults_to_cost() {
        let cli = parse(&[]);
        assert!(matches!(cli.command(), Commands::Cost(args) if args.input == 0 && args.usage.is_none()));
    }

    #[test]
    fn cost_flags() {
        let cli = parse(&[
            "cost", "-i", "100", "-o", "20", "--cache-write", "5", "--cache-read", "7", "-m",
            "claude-3-opus-20240229",
        ]);
        let Commands::Cost(args) = cli.command() else {
            panic!("expected cost command");
        };
        assert_eq!(args.input, 100);
        assert_eq!(args.output, 20);
        assert_eq!(args.cache_write, Some(5));
        assert_eq!(args.cache_read, Some(7));
        assert_eq!(cli.model.as_deref(), Some("claude-3-opus-20240229"));
    }

    #[test]
    fn cost_accepts_negative_counts() {
        let cli = parse(&["cost", "--input", "-5"]);
        let Commands::Cost(args) = cli.command() else {
            panic!("expected cost command");
        };
        assert_eq!(args.input, -5);
    }

    #[test]
    fn usage_file_conflicts_with_token_flags() {
        let result = Cli::try_parse_from(["ccprice", "cost", "--usage", "u.json", "--input", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn resolve_takes_optional_model() {
        assert!(matches!(parse(&["resolve"]).command(), Commands::Resolve { model: None }));
        assert!(matches!(
            parse(&["resolve", "opus"]).command(),
            Commands::Resolve { model: Some(m) } if m == "opus"
        ));
    }

    #[test]
    fn config_fills_unset_options() {
        let config = Config {
            model: Some("claude-3-haiku-20240307".to_string()),
            json: true,
            strict: true,
            color: Some(ConfigColorMode::Never),
            locale: Some("de".to_string()),
            ..Config::default()
        };
        let cli = parse(&["models"]).with_config(&config);
        assert!(cli.json);
        assert!(cli.strict);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.model.as_deref(), Some("claude-3-haiku-20240307"));
        assert_eq!(cli.locale.as_deref(), Some("de"));
        assert!(!cli.use_color());
    }

    #[test]
    fn cli_flags_beat_config() {
        let config = Config {
            model: Some("claude-3-haiku-20240307".to_string()),
            color: Some(ConfigColorMode::Never),
            locale: Some("de".to_string()),
            ..Config::default()
        };
        let cli = parse(&["--color", "always", "-m", "opus", "--locale", "fr"]).with_config(&config);
        assert_eq!(cli.color, ColorMode::Always);
        assert_eq!(cli.model.as_deref(), Some("opus"));
        assert_eq!(cli.locale.as_deref(), Some("fr"));
        assert!(cli.use_color());
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }
}
