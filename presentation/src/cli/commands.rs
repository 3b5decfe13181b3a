//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use setlist_domain::{ConcertType, Requirements, RequirementsParser, SkillLevel};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with analyses and notes
    Full,
    /// Only the final program
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for setlist_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => setlist_domain::OutputFormat::Full,
            OutputFormat::Summary => setlist_domain::OutputFormat::Summary,
            OutputFormat::Json => setlist_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for setlist-council
#[derive(Parser, Debug)]
#[command(name = "setlist-council")]
#[command(author, version, about = "Advisor council that designs concert setlists")]
#[command(long_about = r#"
Setlist Council asks three advisors to design a concert program.

The council runs four phases:
1. Analysis: each advisor reads the requirements
2. Proposals: each advisor proposes candidate pieces
3. Cross-Evaluation: every advisor scores every candidate
4. Synthesis: the best-scoring pieces that fit are ordered into a program

Configuration files are loaded from (in priority order):
1. SETLIST_* environment variables
2. --config <path>     Explicit config file
3. ./setlist.toml      Project-level config
4. ~/.config/setlist-council/config.toml   Global config

Example:
  setlist-council design "a 45 minute jazz set for piano trio"
  setlist-council design --concert-type classical_recital --skill beginner -d 30
  setlist-council collect "30 minute jazz jam" -p ana=ballads -p ben:Ben="no bebop"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (defaults to the config file value, then summary)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Mirror log output to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Never call the completion service; advisors use built-in picks
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full advisor council and print a program
    Design(DesignArgs),
    /// Show each advisor's proposals without cross-evaluation
    Suggest(RequirementArgs),
    /// Simulate a group preference session
    Collect(CollectArgs),
    /// List concert types, skill levels and instruments
    Catalog,
}

/// Requirement flags shared by `design` and `suggest`
#[derive(Args, Debug, Clone, Default)]
pub struct RequirementArgs {
    /// Free-text request, e.g. "a 45 minute jazz set for piano and bass"
    pub request: Option<String>,

    /// Concert type (jazz_concert, classical_recital, chamber_music, solo_performance, folk_concert)
    #[arg(short = 't', long, value_name = "TYPE")]
    pub concert_type: Option<ConcertType>,

    /// Target duration in minutes
    #[arg(short, long, value_name = "MINUTES")]
    pub duration: Option<u32>,

    /// Hardest difficulty the performers can handle
    #[arg(short, long, value_name = "LEVEL")]
    pub skill: Option<SkillLevel>,

    /// Instruments (can be specified multiple times)
    #[arg(short, long, value_name = "NAME")]
    pub instrument: Vec<String>,

    /// Free-form preference hints (can be specified multiple times)
    #[arg(long, value_name = "HINT")]
    pub prefer: Vec<String>,

    /// Titles already in the repertoire, excluded from the program
    #[arg(long, value_name = "TITLE")]
    pub exclude: Vec<String>,
}

impl RequirementArgs {
    /// Requirements from the free-text request, overridden by explicit flags
    pub fn to_requirements(&self) -> Requirements {
        let mut requirements = match self.request.as_deref() {
            Some(text) if !text.trim().is_empty() => RequirementsParser::parse(text),
            _ => Requirements::default(),
        };

        if let Some(concert_type) = self.concert_type {
            requirements.concert_type = concert_type;
        }
        if let Some(duration) = self.duration {
            requirements.target_duration_minutes = duration;
        }
        if let Some(skill) = self.skill {
            requirements.skill_ceiling = skill;
        }
        for instrument in &self.instrument {
            let instrument = instrument.trim().to_lowercase();
            if !instrument.is_empty() && !requirements.instruments.contains(&instrument) {
                requirements.instruments.push(instrument);
            }
        }
        requirements.preferences.extend(self.prefer.iter().cloned());
        requirements.existing_repertoire.extend(self.exclude.iter().cloned());
        requirements
    }
}

#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    #[command(flatten)]
    pub requirements: RequirementArgs,

    /// Feedback to pass the designed program through one refinement round
    #[arg(long, value_name = "FEEDBACK")]
    pub refine: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// Organizer's request, e.g. "let's plan a 40 minute jazz set"
    pub request: String,

    /// Organizer display name
    #[arg(long, value_name = "NAME", default_value = "Organizer")]
    pub organizer: String,

    /// Participant reply as `id[:name]=text` (can be specified multiple times)
    #[arg(short, long = "participant", value_name = "ID[:NAME]=TEXT", value_parser = parse_participant)]
    pub participants: Vec<ParticipantArg>,
}

/// One simulated participant reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantArg {
    pub id: String,
    pub name: String,
    pub text: String,
}

/// Parse `id[:name]=text`; the name defaults to the id
pub fn parse_participant(raw: &str) -> Result<ParticipantArg, String> {
    let (head, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID[:NAME]=TEXT, got '{}'", raw))?;
    let (id, name) = match head.split_once(':') {
        Some((id, name)) => (id.trim(), name.trim()),
        None => (head.trim(), head.trim()),
    };
    if id.is_empty() {
        return Err(format!("participant id is empty in '{}'", raw));
    }
    Ok(ParticipantArg {
        id: id.to_string(),
        name: if name.is_empty() { id } else { name }.to_string(),
        text: text.trim().to_string(),
    })
}
