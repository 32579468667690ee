// file: src/pipeline/orchestrator.rs
// description: runs feature extraction over a batch of source rows and stores the results
// reference: orchestrates blocking extraction on a bounded async fan-out

use crate::config::PipelineConfig;
use crate::error::{EnrichmentError, Result};
use crate::extractor::FeatureExtractor;
use crate::models::FeatureRecord;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::storage::{FeatureStore, SourceRow, SourceRows, StoredEntry, text_fingerprint};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct EnrichmentOutcome {
    pub records: Vec<FeatureRecord>,
    pub stats: PipelineStats,
}

pub struct EnrichmentPipeline {
    extractor: Arc<FeatureExtractor>,
    parallel_workers: usize,
    force_reprocess: bool,
    show_progress: bool,
    colored: bool,
}

impl EnrichmentPipeline {
    pub fn new(extractor: FeatureExtractor, config: &PipelineConfig) -> Self {
        Self {
            extractor: Arc::new(extractor),
            parallel_workers: config.parallel_workers.max(1),
            force_reprocess: config.force_reprocess,
            show_progress: false,
            colored: false,
        }
    }

    pub fn with_progress(mut self, colored: bool) -> Self {
        self.show_progress = true;
        self.colored = colored;
        self
    }

    pub fn force_reprocess(mut self, force: bool) -> Self {
        self.force_reprocess = force;
        self
    }

    pub async fn run(&self, rows: SourceRows, store: &mut FeatureStore) -> Result<EnrichmentOutcome> {
        info!(
            "Starting enrichment of {} rows ({} workers)",
            rows.len(),
            self.parallel_workers
        );

        let mut stats = PipelineStats::new();
        let mut pending: Vec<(SourceRow, Option<String>)> = Vec::with_capacity(rows.len());

        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Malformed source row, skipping: {}", e);
                    stats.records_failed += 1;
                    continue;
                }
            };

            let fingerprint = row
                .text
                .as_deref()
                .map(|text| text_fingerprint(self.extractor.settings_fingerprint(), text));
            if !self.force_reprocess
                && let Some(hash) = &fingerprint
                && store.text_hash(&row.id)?.as_deref() == Some(hash.as_str())
            {
                debug!("Text unchanged for {}, skipping", row.id);
                stats.records_skipped += 1;
                continue;
            }
            pending.push((row, fingerprint));
        }

        let tracker = Arc::new(if self.show_progress {
            ProgressTracker::with_color(pending.len(), self.colored)
        } else {
            ProgressTracker::hidden(pending.len())
        });

        let results = stream::iter(pending.into_iter().map(|(row, fingerprint)| {
            let extractor = Arc::clone(&self.extractor);
            let tracker = Arc::clone(&tracker);
            async move {
                let id = row.id.clone();
                let result = tokio::task::spawn_blocking(move || {
                    extractor.analyze(row.text.as_deref(), row.id)
                })
                .await
                .map_err(|e| EnrichmentError::Task(e.to_string()));

                match &result {
                    Ok(record) if record.processed => tracker.inc_processed(),
                    Ok(_) => tracker.inc_degraded(),
                    Err(_) => tracker.inc_failed(),
                }
                (id, fingerprint, result)
            }
        }))
        .buffered(self.parallel_workers)
        .collect::<Vec<_>>()
        .await;
        tracker.finish();

        let mut entries: Vec<StoredEntry> = Vec::with_capacity(results.len());
        for (id, fingerprint, result) in results {
            match result {
                Ok(record) => entries.push((record, fingerprint)),
                Err(e) => error!("Extraction failed for {}: {}", id, e),
            }
        }

        let (processed, degraded, failed) = tracker.counts();
        stats.records_processed = processed;
        stats.records_degraded = degraded;
        stats.records_failed += failed;

        if entries.is_empty() && stats.records_skipped == 0 {
            return Err(EnrichmentError::EmptyBatch);
        }

        store.save_all(&entries)?;
        stats.duration_secs = tracker.elapsed_secs();

        info!(
            "Enrichment finished: {} processed, {} unprocessed, {} failed, {} unchanged",
            stats.records_processed,
            stats.records_degraded,
            stats.records_failed,
            stats.records_skipped
        );

        Ok(EnrichmentOutcome {
            records: entries.into_iter().map(|(record, _)| record).collect(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use crate::models::RecordId;
    use pretty_assertions::assert_eq;

    fn pipeline(force: bool) -> EnrichmentPipeline {
        let extractor = FeatureExtractor::from_config(&ExtractionConfig::default()).unwrap();
        let config = PipelineConfig {
            parallel_workers: 2,
            force_reprocess: force,
        };
        EnrichmentPipeline::new(extractor, &config)
    }

    fn row(id: &str, text: Option<&str>) -> Result<SourceRow> {
        Ok(SourceRow {
            id: RecordId::from(id),
            text: text.map(str::to_string),
            name: None,
        })
    }

    fn sample_rows() -> SourceRows {
        vec![
            row("1", Some("Мы занимаемся импортом электроники из Китая. В 2025 году оборот вырос.")),
            row("2", Some("коротко")),
            Err(EnrichmentError::Validation("line 4: missing id".to_string())),
            row("3", Some("Мы не импортируем электронику.")),
        ]
    }

    #[test]
    fn test_run_skips_malformed_rows_and_keeps_order() {
        let mut store = FeatureStore::in_memory().unwrap();
        let outcome = tokio_test::block_on(pipeline(false).run(sample_rows(), &mut store)).unwrap();

        let ids: Vec<&str> = outcome.records.iter().map(|r| r.company_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(outcome.stats.records_processed, 2);
        assert_eq!(outcome.stats.records_degraded, 1);
        assert_eq!(outcome.stats.records_failed, 1);

        assert!(outcome.records[0].is_importer);
        assert!(!outcome.records[2].is_importer);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_unchanged_text_is_skipped_unless_forced() {
        let mut store = FeatureStore::in_memory().unwrap();
        tokio_test::block_on(pipeline(false).run(sample_rows(), &mut store)).unwrap();

        let again = tokio_test::block_on(pipeline(false).run(sample_rows(), &mut store)).unwrap();
        assert_eq!(again.stats.records_skipped, 3);
        assert!(again.records.is_empty());

        let forced = tokio_test::block_on(pipeline(true).run(sample_rows(), &mut store)).unwrap();
        assert_eq!(forced.stats.records_skipped, 0);
        assert_eq!(forced.records.len(), 3);
    }

    #[test]
    fn test_changed_extraction_settings_reprocess_unchanged_text() {
        let mut store = FeatureStore::in_memory().unwrap();
        tokio_test::block_on(pipeline(false).run(sample_rows(), &mut store)).unwrap();

        let mut extraction = ExtractionConfig::default();
        extraction.import_keywords.push("мы".to_string());
        let extractor = FeatureExtractor::from_config(&extraction).unwrap();
        let config = PipelineConfig {
            parallel_workers: 2,
            force_reprocess: false,
        };
        let changed = EnrichmentPipeline::new(extractor, &config);

        let outcome = tokio_test::block_on(changed.run(sample_rows(), &mut store)).unwrap();
        assert_eq!(outcome.stats.records_skipped, 0);
        assert_eq!(outcome.records.len(), 3);
        // "мы" opens the sentence, so nothing can negate it
        assert!(outcome.records[2].is_importer);
        assert!(store.get(&RecordId::from("3")).unwrap().unwrap().is_importer);
    }

    #[test]
    fn test_progress_counts_match_stats() {
        let mut store = FeatureStore::in_memory().unwrap();
        let outcome = tokio_test::block_on(pipeline(false).run(sample_rows(), &mut store)).unwrap();

        assert_eq!(outcome.stats.records_stored(), 3);
        assert_eq!(outcome.stats.records_failed, 1);
    }

    #[test]
    fn test_empty_batch_is_error() {
        let mut store = FeatureStore::in_memory().unwrap();
        let rows = vec![Err(EnrichmentError::Validation("bad row".to_string()))];

        let result = tokio_test::block_on(pipeline(false).run(rows, &mut store));
        assert!(matches!(result, Err(EnrichmentError::EmptyBatch)));
    }

    #[test]
    fn test_rows_without_text_are_stored_unprocessed() {
        let mut store = FeatureStore::in_memory().unwrap();
        let rows = vec![row("10", None)];

        let outcome = tokio_test::block_on(pipeline(false).run(rows, &mut store)).unwrap();
        assert_eq!(
            outcome.records,
            vec![FeatureRecord::unprocessed(RecordId::from("10"))]
        );
    }
}
