// file: src/outreach/batch.rs
// description: draft generation over stored records, filtered by human review
// reference: batch driver for the email composer

use crate::models::{FeatureRecord, OutreachDraft, RecordId};
use crate::outreach::composer::EmailComposer;
use std::collections::{HashMap, HashSet};
use tracing::info;

pub struct DraftBatch {
    pub drafts: Vec<OutreachDraft>,
    pub average_score: f64,
}

/// `confirmed` is `None` when no review file exists; in that case every
/// record gets a draft even if `only_validated` is set.
pub fn compose_batch(
    composer: &EmailComposer,
    records: &[FeatureRecord],
    names: &HashMap<RecordId, String>,
    confirmed: Option<&HashSet<RecordId>>,
    only_validated: bool,
) -> DraftBatch {
    let selected: Vec<&FeatureRecord> = match confirmed {
        Some(confirmed) if only_validated => {
            let selected: Vec<&FeatureRecord> = records
                .iter()
                .filter(|r| confirmed.contains(&r.company_id))
                .collect();
            info!("Composing drafts for {} validated companies", selected.len());
            selected
        }
        _ => {
            info!("Composing drafts for all {} companies", records.len());
            records.iter().collect()
        }
    };

    let drafts: Vec<OutreachDraft> = selected
        .into_iter()
        .map(|record| {
            let name = names.get(&record.company_id).map(String::as_str);
            composer.compose(record, name)
        })
        .collect();

    let average_score = if drafts.is_empty() {
        0.0
    } else {
        let total: u32 = drafts.iter().map(|d| d.personalization_score as u32).sum();
        total as f64 / drafts.len() as f64
    };

    DraftBatch {
        drafts,
        average_score,
    }
}
