//! Presentation-level configuration
//!
//! Resolves how results are printed from CLI flags and the file config.

use crate::cli::commands::Cli;
use setlist_domain::OutputFormat;

/// How a progress-aware command reports its phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// No progress output
    Hidden,
    /// Line-based progress on stderr
    Lines,
    /// Progress bars
    Bars,
}

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    pub progress: ProgressMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            progress: ProgressMode::Bars,
        }
    }
}

impl OutputConfig {
    /// Turn colors off process-wide when disabled
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    /// CLI flags win over the file config
    pub fn resolve(cli: &Cli, file_format: Option<OutputFormat>, file_color: bool) -> Self {
        let format = cli
            .output
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();

        // JSON goes to stdout unmixed; bars would interleave with log lines
        let progress = if cli.quiet || format == OutputFormat::Json {
            ProgressMode::Hidden
        } else if cli.verbose > 0 {
            ProgressMode::Lines
        } else {
            ProgressMode::Bars
        };

        Self {
            format,
            color: file_color && format != OutputFormat::Json,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["setlist-council"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_format_overrides_file() {
        let config = OutputConfig::resolve(
            &cli(&["-o", "full", "catalog"]),
            Some(OutputFormat::Json),
            true,
        );
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.color);
        assert_eq!(config.progress, ProgressMode::Bars);
    }

    #[test]
    fn test_file_format_used_when_flag_absent() {
        let config = OutputConfig::resolve(&cli(&["catalog"]), Some(OutputFormat::Json), true);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert_eq!(config.progress, ProgressMode::Hidden);
    }

    #[test]
    fn test_default_is_summary() {
        let config = OutputConfig::resolve(&cli(&["-v", "catalog"]), None, false);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(!config.color);
        assert_eq!(config.progress, ProgressMode::Lines);
    }

    #[test]
    fn test_quiet_hides_progress() {
        let config = OutputConfig::resolve(&cli(&["-q", "catalog"]), None, true);
        assert_eq!(config.progress, ProgressMode::Hidden);
    }
}
