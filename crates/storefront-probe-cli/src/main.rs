//! storefront-probe: end-to-end scenarios for the Swag Labs storefront
//!
//! ## Usage
//!
//! ```bash
//! storefront-probe run                       # Every scenario in chromium
//! storefront-probe run --filter checkout     # One suite
//! storefront-probe run --simulate            # In-memory storefront
//! storefront-probe list --suite cart         # Show scenarios
//! storefront-probe locators --group login    # Show locators
//! ```

use clap::Parser;
use serde_json::json;
use std::process::ExitCode;
use storefront_probe::{locators, scenarios, LogContext, ScenarioRunner, Suite};
use storefront_probe_cli::{
    output, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, ListArgs, LocatorsArgs,
    OutputFormat, Reporter, RunArgs, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Run(args) => run_scenarios(&config, &reporter, &args),
        Commands::List(args) => list_scenarios(&reporter, &args),
        Commands::Locators(args) => show_locators(&reporter, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}

fn run_scenarios(config: &CliConfig, reporter: &Reporter, args: &RunArgs) -> CliResult<()> {
    let session = args.session_config()?;
    let log_dir = (!args.no_log_file).then_some(args.log_dir.as_path());
    let logs = LogContext::global(&config.log_config(log_dir, args.json_logs))?;
    if let Some(path) = logs.log_file() {
        reporter.info(&format!("Run log: {}", path.display()));
    }

    let mut runner = ScenarioRunner::new(args.backend(), session).with_fail_fast(args.fail_fast);
    if let Some(filter) = &args.filter {
        runner = runner.with_filter(filter.trim());
    }
    if runner.selected().is_empty() {
        return Err(CliError::invalid_argument(format!(
            "no scenario matches '{}'",
            args.filter.as_deref().unwrap_or_default()
        )));
    }

    let summary = runner.run_with(|outcome| reporter.outcome(outcome));
    match args.format {
        OutputFormat::Text => reporter.summary(&summary),
        OutputFormat::Json => reporter.print(&serde_json::to_string_pretty(&summary)?)?,
    }

    if summary.all_passed() {
        Ok(())
    } else {
        Err(CliError::scenarios_failed(format!(
            "{} of {} scenarios failed, {} skipped",
            summary.failed_count(),
            summary.total() + summary.skipped,
            summary.skipped
        )))
    }
}

fn list_scenarios(reporter: &Reporter, args: &ListArgs) -> CliResult<()> {
    let selected: Vec<_> = match &args.suite {
        Some(name) => {
            let suite = Suite::parse(name).ok_or_else(|| {
                CliError::invalid_argument(format!("unknown suite '{name}'"))
            })?;
            scenarios::catalog()
                .iter()
                .filter(|s| s.suite == suite)
                .collect()
        }
        None => scenarios::catalog().iter().collect(),
    };

    match args.format {
        OutputFormat::Text => {
            for line in output::scenario_table(&selected) {
                reporter.print(&line)?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = selected
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id(),
                        "suite": s.suite,
                        "name": s.name,
                        "summary": s.summary,
                    })
                })
                .collect();
            reporter.print(&serde_json::to_string_pretty(&rows)?)?;
        }
    }
    Ok(())
}

fn show_locators(reporter: &Reporter, args: &LocatorsArgs) -> CliResult<()> {
    let groups: Vec<(&str, &[storefront_probe::Locator])> = match &args.group {
        Some(name) => {
            let name = name.trim().to_ascii_lowercase();
            let group = locators::GROUPS
                .iter()
                .find(|(group, _)| *group == name)
                .copied()
                .ok_or_else(|| CliError::invalid_argument(format!("unknown page group '{name}'")))?;
            vec![group]
        }
        None => locators::GROUPS.to_vec(),
    };

    match args.format {
        OutputFormat::Text => {
            for (name, group) in groups {
                reporter.print(&format!("[{name}]"))?;
                for line in output::locator_table(group) {
                    reporter.print(&format!("  {line}"))?;
                }
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = groups
                .into_iter()
                .map(|(name, group)| Ok((name.to_string(), serde_json::to_value(group)?)))
                .collect::<Result<_, serde_json::Error>>()?;
            reporter.print(&serde_json::to_string_pretty(&map)?)?;
        }
    }
    Ok(())
}
