use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use cdm_graph_mapping::{load_mapping_config, ntriples_document, TripleGenerator, WriteError};
use cdm_graph_pipeline::{load_records, run_pipeline, DryRunIngest, PipelinePaths};
use cdm_graph_schema::SchemaMapBuilder;
use cdm_graph_tabular::DataCleaner;

fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "cdm_graph=info,cdm_graph_pipeline=info,cdm_graph_schema=info,cdm_graph_tabular=info,cdm_graph_mapping=info",
        )
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact());

    let _ = tracing::dispatcher::set_global_default(tracing::Dispatch::new(subscriber));
}

#[derive(Parser)]
#[command(name = "cdm-graph", about = "CDM record cleaning and RDF triple generation")]
struct Args {
    /// Raw records file (flat JSON array of objects)
    #[arg(long)]
    records: PathBuf,

    /// CDM schema CSV (Level 1 / Level 2 / Level 3 / Format columns)
    #[arg(long)]
    schema: PathBuf,

    /// Mapping configuration YAML (prefixes + mappings)
    #[arg(long)]
    mapping: PathBuf,

    /// Base directory for intermediate and processed files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Print the generated N-Triples to stdout instead of writing,
    /// ingesting, and archiving
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args = Args::parse();
    let raw = load_records(&args.records)?;

    if args.dry_run {
        let formats = SchemaMapBuilder::default().build_from_path(&args.schema)?;
        let (cleaned, _) = DataCleaner::default().clean(raw, &formats);
        let mapping = load_mapping_config(&args.mapping)?;
        let triples = TripleGenerator::new(&mapping).generate(&cleaned);

        match ntriples_document(&triples) {
            Ok(doc) => print!("{}", doc),
            Err(WriteError::NoContent) => info!("No triples generated; nothing to print"),
            Err(e) => return Err(Box::new(e)),
        }
        return Ok(());
    }

    let paths = PipelinePaths::under(&args.data_dir);
    let outcome = run_pipeline(
        raw,
        Some(args.records.as_path()),
        &args.schema,
        &args.mapping,
        &paths,
        &DryRunIngest,
    )?;

    info!(
        source_id = %outcome.source_id,
        triples = outcome.triple_count,
        rows_dropped = outcome.clean_report.rows_dropped,
        ingested = outcome.ingested,
        artifact = %outcome.artifact_path.display(),
        "Pipeline run complete"
    );

    Ok(())
}
