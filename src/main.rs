// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use lead_enricher::utils::logging::{
    format_error, format_flag, format_info, format_step, format_success, format_tally,
    format_warning,
};
use lead_enricher::{
    Confidence, Config, EmailComposer, EnrichmentPipeline, EnrichmentReport, FeatureExtractor,
    FeatureRecord, FeatureStore, ImporterVerdict, RecordId, ValidationRecord, ValidationStore,
    SourceRow, Validator, compose_batch, read_source, write_drafts,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

const SHOW_TEXT_CHARS: usize = 1000;

#[derive(Parser)]
#[command(name = "lead_enricher")]
#[command(version = "0.1.0")]
#[command(about = "Feature extraction and outreach drafting for company descriptions", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features for every source row and store them
    Enrich {
        /// Reprocess rows whose text has not changed
        #[arg(long)]
        force: bool,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Extract features from a single text without storing them
    Analyze {
        #[arg(long)]
        id: String,

        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print a stored record
    Show { id: String },

    /// List stored companies that have not been reviewed yet
    Pending,

    /// Record a human review for a company
    Review {
        id: String,

        #[arg(long)]
        validator: String,

        /// yes, no or unknown
        #[arg(long)]
        importer: String,

        /// low, medium or high
        #[arg(long, default_value = "medium")]
        confidence: String,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Generate outreach drafts
    Compose {
        /// Include companies that were not confirmed by review
        #[arg(long)]
        all: bool,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Recompute the summary report from the store
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    lead_enricher::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Enrich {
            force,
            limit,
            report,
        } => {
            cmd_enrich(&config, force, limit, report, cli.color).await?;
        }
        Commands::Analyze { id, text, file } => {
            cmd_analyze(&config, id, text, file)?;
        }
        Commands::Show { id } => {
            cmd_show(&config, id)?;
        }
        Commands::Pending => {
            cmd_pending(&config)?;
        }
        Commands::Review {
            id,
            validator,
            importer,
            confidence,
            comment,
        } => {
            cmd_review(&config, id, validator, &importer, &confidence, comment)?;
        }
        Commands::Compose { all, output } => {
            cmd_compose(&config, all, output)?;
        }
        Commands::Report => {
            cmd_report(&config)?;
        }
    }

    Ok(())
}

async fn cmd_enrich(
    config: &Config,
    force: bool,
    limit: Option<usize>,
    report_path: Option<PathBuf>,
    colored: bool,
) -> Result<()> {
    let start_time = Instant::now();

    println!("{}", format_step(1, 3, "Reading source rows"));
    let rows = read_source(&config.input).context("Failed to read source")?;
    let rows = match limit {
        Some(limit) => rows.into_iter().take(limit).collect(),
        None => rows,
    };

    println!("{}", format_step(2, 3, "Extracting features"));
    let extractor =
        FeatureExtractor::from_config(&config.extraction).context("Failed to build extractor")?;
    let pipeline = EnrichmentPipeline::new(extractor, &config.pipeline)
        .force_reprocess(force || config.pipeline.force_reprocess)
        .with_progress(colored);

    let mut store = FeatureStore::open(&config.storage.database_path)
        .context("Failed to open feature store")?;
    let outcome = pipeline
        .run(rows, &mut store)
        .await
        .context("Enrichment failed")?;

    let stats = &outcome.stats;
    println!(
        "{}",
        format_success(&format!(
            "{} processed, {} unprocessed, {} unchanged",
            stats.records_processed, stats.records_degraded, stats.records_skipped
        ))
    );
    println!(
        "{}",
        format_info(&format!("Success rate: {:.1}%", stats.success_rate()))
    );
    if stats.records_failed > 0 {
        println!(
            "{}",
            format_warning(&format!("{} rows failed", stats.records_failed))
        );
    }

    println!("{}", format_step(3, 3, "Building report"));
    let report = EnrichmentReport::from_records(&store.load_all()?);
    for line in report.lines() {
        println!("  {}", line);
    }

    let report_path = report_path.unwrap_or_else(|| config.storage.report_path.clone());
    if let Err(e) = report.write_json(&report_path) {
        error!("Failed to write report to {}: {}", report_path.display(), e);
    }

    info!(
        "Enrichment complete in {:.2}s ({:.1} records/s)",
        start_time.elapsed().as_secs_f64(),
        stats.records_per_second()
    );
    Ok(())
}

fn cmd_analyze(
    config: &Config,
    id: String,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            Validator::validate_file_path(&path)?;
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Validator::validate_content_not_empty(&content)?;
            content
        }
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };

    let extractor =
        FeatureExtractor::from_config(&config.extraction).context("Failed to build extractor")?;
    let record = extractor.analyze(Some(&text), RecordId::new(id));

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_show(config: &Config, id: String) -> Result<()> {
    let store = FeatureStore::open(&config.storage.database_path)?;
    let id = RecordId::new(id);

    let Some(record) = store.get(&id)? else {
        println!("{}", format_error(&format!("No record for {}", id)));
        return Ok(());
    };

    let source = load_source_rows(config)
        .into_iter()
        .find(|row| row.id == id);
    if let Some(name) = source.as_ref().and_then(|row| row.name.as_deref()) {
        println!("Название: {}", name);
    }
    print_record(&record);
    if record.is_empty() {
        println!("{}", format_warning("No features found in the text"));
    }
    match source.as_ref().and_then(|row| row.text.as_deref()) {
        Some(text) => println!("\nТекст:\n{}\n", Validator::truncate_text(text, SHOW_TEXT_CHARS)),
        None => println!("{}", format_info("Source text unavailable")),
    }

    let validations = ValidationStore::new(&config.storage.validation_path);
    match validations.get(&id)? {
        Some(review) => println!(
            "{}",
            format_info(&format!(
                "Reviewed by {}: {} ({})",
                review.validator_name,
                review.is_active_importer.as_str(),
                review.confidence.as_str()
            ))
        ),
        None => println!("{}", format_info("Not reviewed yet")),
    }
    Ok(())
}

fn print_record(record: &FeatureRecord) {
    println!("Компания: {}", record.company_id);
    println!("  {}", format_flag("Импортёр", record.is_importer));
    println!("  {}", format_flag("Обработано", record.processed));
    println!("  {}", format_flag("Финансовые показатели", record.has_financial_indicators));
    println!("  {}", format_flag("Недавняя активность", record.recent_activity));
    println!("  Индикаторы активности: {}", record.activity_indicators);
    println!("  Продукты: {}", lead_enricher::storage::join_list(&record.product_mentions));
    println!("  Страны: {}", lead_enricher::storage::join_list(&record.mentioned_countries));
}

fn cmd_pending(config: &Config) -> Result<()> {
    let store = FeatureStore::open(&config.storage.database_path)?;
    let reviewed: HashSet<RecordId> = ValidationStore::new(&config.storage.validation_path)
        .load()?
        .into_iter()
        .map(|r| r.company_id)
        .collect();

    let records = store.load_all()?;
    let total = records.len();
    let pending: Vec<FeatureRecord> = records
        .into_iter()
        .filter(|r| !reviewed.contains(&r.company_id))
        .collect();

    let names = load_names(config);
    for record in &pending {
        let marker = if record.is_importer { "*" } else { " " };
        let name = names
            .get(&record.company_id)
            .map(|n| Validator::truncate_text(n, 40))
            .unwrap_or_default();
        println!("{} {:<16} {}", marker, record.company_id, name);
    }
    println!("{}", format_tally("Проверено", total - pending.len(), total));
    println!("{}", format_tally("Осталось", pending.len(), total));
    Ok(())
}

fn cmd_review(
    config: &Config,
    id: String,
    validator: String,
    importer: &str,
    confidence: &str,
    comment: String,
) -> Result<()> {
    let verdict: ImporterVerdict = importer.parse()?;
    let confidence: Confidence = confidence.parse()?;
    let id = RecordId::new(id);

    let store = FeatureStore::open(&config.storage.database_path)?;
    if store.get(&id)?.is_none() {
        warn!("No stored record for {}, saving review anyway", id);
    }

    let record = ValidationRecord::new(id.clone(), validator, verdict, confidence, comment);
    let replaced = ValidationStore::new(&config.storage.validation_path).upsert(record)?;

    let action = if replaced { "Updated" } else { "Saved" };
    println!(
        "{}",
        format_success(&format!("{} review for {}: {}", action, id, verdict.as_str()))
    );
    Ok(())
}

fn cmd_compose(config: &Config, all: bool, output: Option<PathBuf>) -> Result<()> {
    let store = FeatureStore::open(&config.storage.database_path)?;
    let records = store.load_all()?;

    let names = load_names(config);

    let validations = ValidationStore::new(&config.storage.validation_path);
    let confirmed = if validations.path().exists() {
        Some(validations.confirmed_importers()?)
    } else {
        None
    };

    let composer = EmailComposer::from_config(&config.outreach);
    let only_validated = config.outreach.only_validated && !all;
    let batch = compose_batch(&composer, &records, &names, confirmed.as_ref(), only_validated);

    if batch.drafts.is_empty() {
        println!("{}", format_warning("No companies to compose drafts for"));
        return Ok(());
    }

    let output = output.unwrap_or_else(|| config.storage.drafts_path.clone());
    write_drafts(&output, &batch.drafts)?;

    println!(
        "{}",
        format_success(&format!(
            "Generated {} drafts, saved to {}",
            batch.drafts.len(),
            output.display()
        ))
    );
    println!(
        "{}",
        format_info(&format!(
            "Average personalization: {:.1}/9",
            batch.average_score
        ))
    );

    if let Some(first) = batch.drafts.first() {
        println!("{}", "-".repeat(60));
        println!("Кому: {}", first.company_name);
        println!("Тема: {}", first.subject);
        println!("\n{}", first.body);
        println!("{}", "-".repeat(60));
    }
    Ok(())
}

/// Source rows for display only; an unreadable source yields none.
fn load_source_rows(config: &Config) -> Vec<SourceRow> {
    match read_source(&config.input) {
        Ok(rows) => rows.into_iter().flatten().collect(),
        Err(e) => {
            warn!("Source rows unavailable: {}", e);
            Vec::new()
        }
    }
}

fn load_names(config: &Config) -> HashMap<RecordId, String> {
    if config.input.name_column.is_none() {
        return HashMap::new();
    }

    load_source_rows(config)
        .into_iter()
        .filter_map(|row| row.name.map(|name| (row.id, name)))
        .collect()
}

fn cmd_report(config: &Config) -> Result<()> {
    let store = FeatureStore::open(&config.storage.database_path)?;
    let report = EnrichmentReport::from_records(&store.load_all()?);

    for line in report.lines() {
        println!("{}", line);
    }
    report.write_json(&config.storage.report_path)?;
    println!(
        "{}",
        format_success(&format!(
            "Report saved to {}",
            config.storage.report_path.display()
        ))
    );
    Ok(())
}
