use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flyrnai_screens::config::{ConfigLoader, ConfigOverrides};
use flyrnai_screens::error::ScreenError;
use flyrnai_screens::output::{JsonOutput, OutputMode, TextOutput};
use flyrnai_screens::pipeline::{Pipeline, PipelineOptions};
use flyrnai_screens::resolver::GeneIdentifierTable;
use flyrnai_screens::store::JsonLinesStore;

#[derive(Parser)]
#[command(name = "flyrnai-ingest")]
#[command(about = "Convert DRSC RNAi screen details and hits into JSON-lines items")]
#[command(version, author)]
struct Cli {
    #[arg(long, help = "JSON config file (default: ./flyrnai-screens.json if present)")]
    config: Option<String>,

    #[arg(long)]
    screen_details: Option<String>,

    #[arg(long)]
    hits: Option<String>,

    #[arg(long, help = "taxon / primary id / symbol / synonyms table")]
    gene_identifiers: Option<String>,

    #[arg(long)]
    output: Option<String>,

    #[arg(long)]
    data_source: Option<String>,

    #[arg(long)]
    data_set: Option<String>,

    #[arg(long, help = "fail on a repeated screen name instead of keeping the last")]
    reject_duplicate_screens: bool,

    #[arg(long, help = "print the run summary as JSON")]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<ScreenError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ScreenError) -> u8 {
    match error {
        ScreenError::MalformedRow { .. }
        | ScreenError::UnrecognizedResultCode { .. }
        | ScreenError::DuplicateScreen(_)
        | ScreenError::IdentifierTable { .. } => 2,
        ScreenError::ScreenWithoutDetails(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let overrides = ConfigOverrides {
        screen_details: cli.screen_details,
        hits: cli.hits,
        gene_identifiers: cli.gene_identifiers,
        output: cli.output,
        data_source: cli.data_source,
        data_set: cli.data_set,
        reject_duplicate_screens: cli.reject_duplicate_screens,
    };
    let config = ConfigLoader::resolve(cli.config.as_deref(), overrides)?;

    let resolver = GeneIdentifierTable::from_path(config.gene_identifiers.as_std_path())?;
    info!(
        primaries = resolver.primary_count(),
        path = %config.gene_identifiers,
        "loaded gene identifiers"
    );

    let mut store = JsonLinesStore::create(&config.output)?;
    let options = PipelineOptions {
        provenance: config.provenance.clone(),
        duplicate_screens: config.duplicate_screens,
    };
    let summary = Pipeline::new(&resolver, &mut store, options).run_files(
        config.screen_details.as_std_path(),
        config.hits.as_std_path(),
    )?;
    let written = store.finish()?;
    info!(items = written, output = %config.output, "items written");

    match output_mode {
        OutputMode::Json => JsonOutput::print_summary(&summary).into_diagnostic()?,
        OutputMode::Text => {
            TextOutput::print_summary(&summary, config.output.as_str()).into_diagnostic()?
        }
    }
    Ok(())
}
