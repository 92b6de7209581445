use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use publist::dedupe::{Deduplicator, DeduplicatorConfig, ResolutionStrategy};
use publist::normalize::Normalizer;
use publist::output;
use publist::pipeline::Pipeline;
use publist::roster::Roster;
use publist::{CrossrefParser, DataCiteParser, RawRecord, RegistryParser};

#[derive(Parser)]
#[command(name = "publist")]
#[command(about = "Builds a deduplicated, newest-first publication list from registry responses")]
#[command(version)]
struct Cli {
    #[arg(short, long, help = "TOML file naming the subject researcher and group roster")]
    roster: PathBuf,

    #[arg(long, help = "Saved Crossref works response (JSON), may be repeated")]
    crossref: Vec<PathBuf>,

    #[arg(long, help = "Saved DataCite DOIs response (JSON), may be repeated")]
    datacite: Vec<PathBuf>,

    #[arg(short, long, help = "Output JSON file (defaults to stdout)")]
    output: Option<PathBuf>,

    #[arg(long, help = "Also write the DOI list, one per line")]
    dois: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value_t = Strategy::SinglePass,
        help = "How duplicate records are grouped"
    )]
    strategy: Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    SinglePass,
    Transitive,
}

impl From<Strategy> for ResolutionStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::SinglePass => ResolutionStrategy::SinglePass,
            Strategy::Transitive => ResolutionStrategy::Transitive,
        }
    }
}

fn read_records(parser: &impl RegistryParser, path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parser
        .parse(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "loaded registry page");
    Ok(records)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let roster = Roster::load(&cli.roster)
        .with_context(|| format!("Failed to load roster {}", cli.roster.display()))?;

    // Crossref first, so its records are seen before DataCite's
    let mut records = Vec::new();
    for path in &cli.crossref {
        records.extend(read_records(&CrossrefParser::new(), path)?);
    }
    for path in &cli.datacite {
        records.extend(read_records(&DataCiteParser::new(), path)?);
    }

    let deduplicator = Deduplicator::new().with_config(DeduplicatorConfig {
        strategy: cli.strategy.into(),
    });
    let pipeline = Pipeline::new(Normalizer::new(roster), deduplicator);
    let result = pipeline.run(records);

    match &cli.output {
        Some(path) => {
            output::save_json(path, &result.publications)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                publications = result.publications.len(),
                "saved publications"
            );
        }
        None => output::write_json(io::stdout().lock(), &result.publications)?,
    }

    if let Some(path) = &cli.dois {
        let mut file = io::BufWriter::new(
            fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        for doi in output::dois(&result.publications) {
            writeln!(file, "{doi}")?;
        }
        file.flush()?;
    }

    Ok(())
}
