//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storefront_probe::config::env;
use storefront_probe::{
    Backend, DriverConfig, ProbeError, ProbeResult, SessionConfig, WaitOptions,
    DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// storefront-probe: end-to-end scenarios for the Swag Labs storefront
#[derive(Parser, Debug)]
#[command(name = "storefront-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the storefront
    Run(RunArgs),

    /// List scenarios
    List(ListArgs),

    /// Show the locator registry
    Locators(LocatorsArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Only run scenarios of this suite, with this name, or whose id contains it
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Use the in-memory storefront instead of a browser
    #[arg(long)]
    pub simulate: bool,

    /// Stop after the first failed scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Storefront under test
    #[arg(long, env = env::BASE_URL, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// `ui` opens a visible browser window; anything else stays headless
    #[arg(long, env = env::HEADLESS, value_name = "MODE")]
    pub headless: Option<String>,

    /// Browser executable
    #[arg(long, env = env::CHROME_PATH)]
    pub chrome_path: Option<PathBuf>,

    /// Element wait timeout in milliseconds
    #[arg(long, env = env::WAIT_TIMEOUT_MS, default_value_t = DEFAULT_WAIT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Element wait poll interval in milliseconds
    #[arg(long, env = env::POLL_MS, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_ms: u64,

    /// Outline each element before acting on it
    #[arg(long, env = env::HIGHLIGHT)]
    pub highlight: bool,

    /// Seed for generated data and random product picks
    #[arg(long, env = env::SEED)]
    pub seed: Option<u64>,

    /// Directory for the run log
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Do not write a run log file
    #[arg(long)]
    pub no_log_file: bool,

    /// Console log lines as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Summary format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Backend selected by `--simulate`
    #[must_use]
    pub const fn backend(&self) -> Backend {
        if self.simulate {
            Backend::Simulated
        } else {
            Backend::Chromium
        }
    }

    /// Session configuration from the flags
    pub fn session_config(&self) -> ProbeResult<SessionConfig> {
        if self.poll_ms == 0 {
            return Err(ProbeError::config("poll interval must be positive"));
        }
        let headless = self
            .headless
            .as_deref()
            .map_or(true, |mode| !mode.trim().eq_ignore_ascii_case("ui"));
        let mut driver = DriverConfig::new().headless(headless);
        if let Some(path) = &self.chrome_path {
            driver = driver.executable(path);
        }
        Ok(SessionConfig::new()
            .with_base_url(self.base_url.trim())
            .with_driver(driver)
            .with_wait(
                WaitOptions::new()
                    .with_timeout(self.timeout_ms)
                    .with_poll_interval(self.poll_ms),
            )
            .with_highlight(self.highlight)
            .with_seed(self.seed))
    }
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list this suite
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the locators command
#[derive(Parser, Debug)]
pub struct LocatorsArgs {
    /// Only show this page group (login, header, inventory, ...)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON on stdout
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("storefront-probe").chain(args.iter().copied()))
            .unwrap()
    }

    fn run_args(args: &[&str]) -> RunArgs {
        match parse(args).command {
            Commands::Run(run) => run,
            other => panic!("expected run, got {other:?}"),
        }
    }

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn test_global_flags() {
            let cli = parse(&["-vv", "--color", "never", "list"]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(matches!(cli.command, Commands::List(_)));
        }

        #[test]
        fn test_run_defaults() {
            let run = run_args(&["run", "--simulate"]);
            assert!(run.simulate);
            assert!(!run.fail_fast);
            assert_eq!(run.log_dir, PathBuf::from("logs"));
            assert_eq!(run.format, OutputFormat::Text);
            assert_eq!(run.backend(), Backend::Simulated);
        }

        #[test]
        fn test_locators_group() {
            let cli = parse(&["locators", "--group", "cart", "--format", "json"]);
            match cli.command {
                Commands::Locators(args) => {
                    assert_eq!(args.group.as_deref(), Some("cart"));
                    assert_eq!(args.format, OutputFormat::Json);
                }
                other => panic!("expected locators, got {other:?}"),
            }
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["storefront-probe"]).is_err());
        }
    }

    mod session_config_tests {
        use super::*;

        #[test]
        fn test_flags_map_to_config() {
            let run = run_args(&[
                "run",
                "--base-url",
                "http://localhost:3000",
                "--headless",
                "ui",
                "--chrome-path",
                "/opt/chromium",
                "--timeout-ms",
                "900",
                "--poll-ms",
                "20",
                "--highlight",
                "--seed",
                "11",
            ]);
            let config = run.session_config().unwrap();
            assert_eq!(config.base_url, "http://localhost:3000");
            assert!(!config.driver.headless);
            assert_eq!(config.driver.executable_path, Some(PathBuf::from("/opt/chromium")));
            assert_eq!(config.wait.timeout_ms, 900);
            assert_eq!(config.wait.poll_interval_ms, 20);
            assert!(config.highlight);
            assert_eq!(config.seed, Some(11));
            assert_eq!(run.backend(), Backend::Chromium);
        }

        #[test]
        fn test_headless_unless_ui() {
            let run = run_args(&["run", "--headless", "yes"]);
            assert!(run.session_config().unwrap().driver.headless);
        }

        #[test]
        fn test_zero_poll_is_rejected() {
            let run = run_args(&["run", "--poll-ms", "0"]);
            assert!(run.session_config().is_err());
        }
    }

    #[test]
    fn test_color_arg_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }
}
