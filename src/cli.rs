//! CLI definition and dispatch.

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_file_adapter::JsonFileAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{validate_dashboard_config, validate_rules_config};
use crate::domain::dashboard::evaluate_dashboard;
use crate::domain::error::SignalError;
use crate::domain::settings::{DashboardSettings, Interval, RuleSettings};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "sessionsignal",
    about = "Morning Pop and Overnight Hold checks for one ticker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate both rules for the current session
    Evaluate(EvaluateArgs),
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct EvaluateArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Ticker in provider format, e.g. GEVO.US
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long)]
    pub interval: Option<Interval>,
    /// Read provider JSON dumps from this directory instead of the API
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Evaluation time as RFC 3339 (defaults to the current time)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<FixedOffset>>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn parse_now(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s.trim()).map_err(|e| format!("expected RFC 3339 time: {e}"))
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate(args) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match run_evaluate(&args, &mut out) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    (&e).into()
                }
            }
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SignalError> {
    FileConfigAdapter::from_file(path)
}

/// Validate `config` and build settings from it, falling back to defaults.
pub fn build_settings(config: &dyn ConfigPort) -> Result<DashboardSettings, SignalError> {
    validate_dashboard_config(config)?;
    validate_rules_config(config)?;

    let defaults = DashboardSettings::default();
    let interval = match config.get_string("dashboard", "interval") {
        Some(raw) => raw
            .parse::<Interval>()
            .map_err(|reason| SignalError::invalid("dashboard", "interval", reason))?,
        None => defaults.interval,
    };
    let rd = RuleSettings::default();

    Ok(DashboardSettings {
        symbol: config
            .get_string("dashboard", "symbol")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.symbol),
        interval,
        rules: RuleSettings {
            gap_limit_pct: config.get_double("rules", "gap_limit", rd.gap_limit_pct),
            vola_limit_pct: config.get_double("rules", "vola_limit", rd.vola_limit_pct),
            news_window_hours: config.get_int("rules", "news_window_hours", rd.news_window_hours),
            earnings_window_days: config.get_int(
                "rules",
                "earnings_window_days",
                rd.earnings_window_days,
            ),
            eod_lookback_days: config.get_int(
                "rules",
                "eod_lookback_days",
                rd.eod_lookback_days as i64,
            ) as u64,
        },
    })
}

/// Apply command-line overrides on top of file settings.
pub fn apply_overrides(
    mut settings: DashboardSettings,
    args: &EvaluateArgs,
) -> Result<DashboardSettings, SignalError> {
    if let Some(symbol) = &args.symbol {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.contains(char::is_whitespace) {
            return Err(SignalError::invalid(
                "dashboard",
                "symbol",
                format!("'{symbol}' is not a ticker"),
            ));
        }
        settings.symbol = symbol.to_string();
    }
    if let Some(interval) = args.interval {
        settings.interval = interval;
    }
    Ok(settings)
}

/// The flag wins over `[data] dir`.
pub fn resolve_data_dir(args: &EvaluateArgs, config: &dyn ConfigPort) -> Option<PathBuf> {
    args.data_dir.clone().or_else(|| {
        config
            .get_string("data", "dir")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
    })
}

fn market_data(
    args: &EvaluateArgs,
    config: &dyn ConfigPort,
) -> Result<Box<dyn MarketDataPort>, SignalError> {
    if let Some(dir) = resolve_data_dir(args, config) {
        eprintln!("Reading market data from {}", dir.display());
        return Ok(Box::new(JsonFileAdapter::new(dir)));
    }
    remote_market_data(config)
}

#[cfg(feature = "eodhd")]
fn remote_market_data(config: &dyn ConfigPort) -> Result<Box<dyn MarketDataPort>, SignalError> {
    use crate::adapters::eodhd_adapter::EodhdAdapter;

    let adapter = EodhdAdapter::from_config(config)?;
    eprintln!("Fetching market data from {}", adapter.base_url());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "eodhd"))]
fn remote_market_data(_config: &dyn ConfigPort) -> Result<Box<dyn MarketDataPort>, SignalError> {
    Err(SignalError::ConfigMissing {
        section: "data".into(),
        key: "dir".into(),
    })
}

/// Run one evaluation and render it to `out`.
pub fn run_evaluate(args: &EvaluateArgs, out: &mut dyn Write) -> Result<(), SignalError> {
    let config = match &args.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };

    let settings = apply_overrides(build_settings(&config)?, args)?;
    let port = market_data(args, &config)?;
    let now = args.now.unwrap_or_else(|| Utc::now().fixed_offset());

    eprintln!(
        "Evaluating {} ({}) at {}",
        settings.symbol,
        settings.interval,
        now.to_rfc3339()
    );
    let report = evaluate_dashboard(port.as_ref(), &settings, now);

    let reporter: Box<dyn ReportPort> = match args.format {
        OutputFormat::Text => Box::new(TextReportAdapter),
        OutputFormat::Json => Box::new(JsonReportAdapter),
    };
    reporter.render(&report, out)?;
    out.flush()?;
    Ok(())
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let settings = match load_config(config_path).and_then(|c| build_settings(&c)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let r = &settings.rules;
    eprintln!("  symbol:               {}", settings.symbol);
    eprintln!("  interval:             {}", settings.interval);
    eprintln!("  gap_limit:            {:.1}%", r.gap_limit_pct);
    eprintln!("  vola_limit:           {:.1}%", r.vola_limit_pct);
    eprintln!("  news_window_hours:    {}", r.news_window_hours);
    eprintln!("  earnings_window_days: {}", r.earnings_window_days);
    eprintln!("  eod_lookback_days:    {}", r.eod_lookback_days);
    eprintln!("\nConfig OK");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "sessionsignal",
            "evaluate",
            "--symbol",
            "AAPL.US",
            "--interval",
            "1h",
            "--now",
            "2024-03-15T10:00:00-04:00",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.symbol.as_deref(), Some("AAPL.US"));
        assert_eq!(args.interval, Some(Interval::OneHour));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.now.unwrap().to_rfc3339(), "2024-03-15T10:00:00-04:00");
    }

    #[test]
    fn rejects_bad_interval_and_time() {
        assert!(Cli::try_parse_from(["sessionsignal", "evaluate", "--interval", "15m"]).is_err());
        assert!(Cli::try_parse_from(["sessionsignal", "evaluate", "--now", "today"]).is_err());
    }

    #[test]
    fn format_defaults_to_text() {
        let cli = Cli::try_parse_from(["sessionsignal", "evaluate"]).unwrap();
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.config.is_none());
    }
}
