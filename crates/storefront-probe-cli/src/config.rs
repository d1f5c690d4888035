//! CLI configuration

use serde::Serialize;
use storefront_probe::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - interaction primitives too
    Verbose,
    /// Debug - everything
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Console log level for this verbosity
    #[must_use]
    pub const fn console_level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Debug => LevelFilter::TRACE,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Logging setup for a run
    ///
    /// The run log goes to `log_dir` when set. JSON console output is used
    /// when `json_logs` is set.
    #[must_use]
    pub fn log_config(&self, log_dir: Option<&std::path::Path>, json_logs: bool) -> LogConfig {
        let mut config = LogConfig::new()
            .with_console_level(self.verbosity.console_level())
            .with_format(if json_logs {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            });
        if let Some(dir) = log_dir {
            config = config.with_dir(dir);
        }
        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::Path;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
        }

        #[test]
        fn test_levels() {
            assert_eq!(Verbosity::Quiet.console_level(), LevelFilter::ERROR);
            assert_eq!(Verbosity::Normal.console_level(), LevelFilter::INFO);
            assert!(Verbosity::Debug.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    #[test]
    fn test_log_config() {
        let config = CliConfig::new().with_verbosity(Verbosity::Verbose);
        let log = config.log_config(Some(Path::new("logs")), true);
        assert_eq!(log.dir.as_deref(), Some(Path::new("logs")));
        assert_eq!(log.console_level, LevelFilter::DEBUG);
        assert_eq!(log.format, LogFormat::Json);

        let log = CliConfig::new().log_config(None, false);
        assert!(log.dir.is_none());
        assert_eq!(log.format, LogFormat::Pretty);
    }
}
