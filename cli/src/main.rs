//! CLI entrypoint for setlist-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use setlist_application::{
    DesignError, DesignProgramUseCase, LlmAdvisor, NoProgress, PreferenceCollector,
    ProgressNotifier, StartSessionInput, StaticCatalog, TextCompletion,
};
use setlist_domain::OutputFormat;
use setlist_infrastructure::{
    BuiltinCatalog, ConfigLoader, FileConfig, InMemorySessionStore, build_completion,
};
use setlist_presentation::{
    CatalogListing, Cli, CollectArgs, CollectTranscript, Command, ConsoleFormatter, DesignArgs,
    OutputConfig, ParticipantReply, ProgressMode, ProgressReporter, RequirementArgs,
    SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting setlist-council");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    let output = OutputConfig::resolve(&cli, config.output.format, config.output.color);
    output.apply();

    // Ctrl-C cancels the running council instead of killing the process mid-write
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                token.cancel();
            }
        });
    }

    match &cli.command {
        Command::Design(args) => run_design(args, &config, &cli, &output, cancellation).await,
        Command::Suggest(args) => run_suggest(args, &config, &cli, &output, cancellation).await,
        Command::Collect(args) => run_collect(args, &output).await,
        Command::Catalog => {
            run_catalog(&output);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(filter).with(console).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

/// Council wiring shared by `design` and `suggest`
fn council(config: &FileConfig, cli: &Cli, cancellation: CancellationToken) -> DesignProgramUseCase {
    // Issues were already reported by `FileConfig::validate`
    let (params, _) = config.council.to_params();
    let completion: Arc<dyn TextCompletion> = build_completion(&config.completion, cli.offline);
    info!(
        provider = completion.provider_name(),
        advisors = params.advisors.len(),
        timeout_secs = params.call_timeout.as_secs(),
        "Council assembled"
    );
    DesignProgramUseCase::new(LlmAdvisor::council(completion, &params))
        .with_cancellation(cancellation)
}

fn notifier(mode: ProgressMode) -> Box<dyn ProgressNotifier> {
    match mode {
        ProgressMode::Hidden => Box::new(NoProgress),
        ProgressMode::Lines => Box::new(SimpleProgress),
        ProgressMode::Bars => Box::new(ProgressReporter::new()),
    }
}

fn cancelled_or(err: DesignError) -> anyhow::Error {
    if err.is_cancelled() {
        anyhow!("Cancelled by user")
    } else {
        err.into()
    }
}

async fn run_design(
    args: &DesignArgs,
    config: &FileConfig,
    cli: &Cli,
    output: &OutputConfig,
    cancellation: CancellationToken,
) -> Result<()> {
    let requirements = args.requirements.to_requirements();
    let use_case = council(config, cli, cancellation);
    let progress = notifier(output.progress);

    let mut report = use_case
        .execute_with_progress(&requirements, progress.as_ref())
        .await
        .map_err(cancelled_or)?;

    if let Some(feedback) = args.refine.as_deref().filter(|f| !f.trim().is_empty()) {
        report.program = use_case
            .refine(&report.program, &requirements, feedback)
            .await
            .map_err(cancelled_or)?;
    }

    if report.is_degraded() {
        warn!("{} degraded call(s) during the run", report.notes.len());
    }

    let text = match output.format {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Summary => ConsoleFormatter::format_program(&report.program),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", text);
    Ok(())
}

async fn run_suggest(
    args: &RequirementArgs,
    config: &FileConfig,
    cli: &Cli,
    output: &OutputConfig,
    cancellation: CancellationToken,
) -> Result<()> {
    let requirements = args.to_requirements();
    let suggestions = council(config, cli, cancellation)
        .suggest(&requirements)
        .await
        .map_err(cancelled_or)?;

    let text = match output.format {
        OutputFormat::Json => ConsoleFormatter::format_json(&suggestions),
        OutputFormat::Full | OutputFormat::Summary => {
            ConsoleFormatter::format_suggestions(&suggestions)
        }
    };
    println!("{}", text);
    Ok(())
}

async fn run_collect(args: &CollectArgs, output: &OutputConfig) -> Result<()> {
    if args.participants.is_empty() {
        bail!("At least one --participant is required");
    }

    let collector = PreferenceCollector::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(BuiltinCatalog::new()),
    );

    let ids = args.participants.iter().map(|p| p.id.clone()).collect();
    let session = collector
        .start_session(
            StartSessionInput::new(args.request.clone(), ids)
                .with_organizer("organizer", args.organizer.clone()),
        )
        .await?;
    if output.format == OutputFormat::Full {
        println!("{}", ConsoleFormatter::format_started(&session));
    }

    let mut replies = Vec::with_capacity(args.participants.len());
    for participant in &args.participants {
        let outcome = collector
            .submit_response(
                &session.session_id,
                &participant.id,
                &participant.name,
                &participant.text,
            )
            .await?;
        if output.format == OutputFormat::Full {
            println!("{}", ConsoleFormatter::format_outcome(&participant.name, &outcome));
        }
        replies.push(ParticipantReply {
            participant: participant.id.clone(),
            outcome,
        });
    }

    let final_state = collector.get_status(&session.session_id).await?;
    match output.format {
        OutputFormat::Json => {
            let transcript = CollectTranscript {
                session,
                replies,
                final_state,
            };
            println!("{}", ConsoleFormatter::format_json(&transcript));
        }
        OutputFormat::Summary => match &final_state.program {
            Some(program) => println!("{}", ConsoleFormatter::format_program(program)),
            None => {
                if let Some(last) = replies.last() {
                    println!("{}", last.outcome.message);
                }
            }
        },
        OutputFormat::Full => {}
    }
    Ok(())
}

fn run_catalog(output: &OutputConfig) {
    let catalog = BuiltinCatalog::new();
    let listing = CatalogListing {
        concert_types: catalog.concert_types(),
        skill_levels: catalog.skill_levels(),
        instruments: catalog.instruments(),
    };

    let text = match output.format {
        OutputFormat::Json => ConsoleFormatter::format_json(&listing),
        OutputFormat::Full | OutputFormat::Summary => ConsoleFormatter::format_catalog(
            &listing.concert_types,
            &listing.skill_levels,
            &listing.instruments,
        ),
    };
    println!("{}", text);
}
