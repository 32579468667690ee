// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for enrichment runs
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Rows analyzed with `processed = true`.
    pub records_processed: usize,
    /// Rows stored with `processed = false` (short, missing or untokenizable text).
    pub records_degraded: usize,
    /// Malformed source rows and failed tasks; nothing stored for these.
    pub records_failed: usize,
    /// Rows whose text is unchanged since the last run.
    pub records_skipped: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_stored(&self) -> usize {
        self.records_processed + self.records_degraded
    }

    pub fn records_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.records_stored() as f64 / self.duration_secs
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.records_stored() + self.records_failed;
        if total == 0 {
            return 0.0;
        }
        (self.records_processed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    processed: Arc<AtomicUsize>,
    degraded: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_records: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(multi_progress, total_records, colored)
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_records: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(multi_progress, total_records, false)
    }

    fn build(multi_progress: MultiProgress, total_records: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_records as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            processed: Arc::new(AtomicUsize::new(0)),
            degraded: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_processed(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
        self.advance();
    }

    pub fn inc_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::SeqCst);
        self.advance();
    }

    pub fn inc_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.advance();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Enrichment complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.processed.load(Ordering::SeqCst),
            self.degraded.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst),
        )
    }

    fn advance(&self) {
        self.main_bar.inc(1);
        let (processed, degraded, failed) = self.counts();
        self.detail_bar.set_message(format!(
            "Processed: {} | Unprocessed: {} | Failed: {}",
            processed, degraded, failed
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            "█▓▒░",
        )
    } else {
        (
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}",
            "=>-",
        )
    };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let stats = PipelineStats {
            records_processed: 90,
            records_degraded: 10,
            records_failed: 10,
            records_skipped: 5,
            duration_secs: 10.0,
        };

        assert_eq!(stats.records_stored(), 100);
        assert_eq!(stats.records_per_second(), 10.0);
        assert!((stats.success_rate() - 81.818).abs() < 0.01);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.records_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::hidden(10);

        tracker.inc_processed();
        tracker.inc_processed();
        tracker.inc_degraded();
        tracker.inc_failed();

        assert_eq!(tracker.counts(), (2, 1, 1));
    }
}
