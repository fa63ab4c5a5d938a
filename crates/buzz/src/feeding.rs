//! Per-transect, per-night feeding-buzz counts.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use nox_ingest::NormalizedRecord;
use nox_reference::Transects;

use crate::config::BuzzConfig;
use crate::error::BuzzError;

/// One transect-night cell of the feeding-buzz dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedingBuzzRow {
    /// Numeric site id of the transect.
    pub site: u32,
    /// Survey transect number.
    pub transect: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// Night index into the run's sun table.
    pub night: usize,
    /// Number of recordings in this cell.
    pub total: u64,
    /// Number of recordings whose buzz index reached the threshold.
    pub feed_buzz: u64,
}

/// Builds the feeding-buzz dataset from a normalized dataset.
///
/// Records are filtered by the config's final-identification first. Every
/// register transect gets one zero-initialised row for every night observed
/// at its site, so transects that were silent on a given night still appear
/// with explicit zeros. Rows come out ordered by transect, then by the
/// order in which the site's nights were first encountered in the input.
///
/// # Errors
///
/// Returns [`BuzzError::UnindexedRecord`] when a record's transect is
/// absent from the register.
pub fn feeding_buzz_dataset(
    records: &[NormalizedRecord],
    transects: &Transects,
    config: &BuzzConfig,
) -> Result<Vec<FeedingBuzzRow>, BuzzError> {
    let filtered: Vec<&NormalizedRecord> =
        records.iter().filter(|r| config.matches(r)).collect();
    debug!(
        total = records.len(),
        kept = filtered.len(),
        final_id = config.final_id().unwrap_or("<all>"),
        "feeding-buzz filter applied"
    );

    // Nights per site, in first-encounter order.
    let mut site_nights: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for record in &filtered {
        let nights = site_nights.entry(record.site).or_default();
        if !nights.contains(&record.night) {
            nights.push(record.night);
        }
    }

    // One zeroed row per register transect per observed night of its site.
    let mut table: BTreeMap<u32, Vec<FeedingBuzzRow>> = BTreeMap::new();
    for (transect, info) in transects.iter() {
        let rows = site_nights
            .get(&info.site)
            .map(|nights| {
                nights
                    .iter()
                    .map(|&night| FeedingBuzzRow {
                        site: info.site,
                        transect,
                        colour: info.colour.clone(),
                        night,
                        total: 0,
                        feed_buzz: 0,
                    })
                    .collect()
            })
            .unwrap_or_default();
        table.insert(transect, rows);
    }

    for record in &filtered {
        let cell = site_nights
            .get(&record.site)
            .and_then(|nights| nights.iter().position(|&n| n == record.night))
            .and_then(|idx| table.get_mut(&record.transect)?.get_mut(idx))
            .ok_or(BuzzError::UnindexedRecord {
                transect: record.transect,
                site: record.site,
                night: record.night,
            })?;
        cell.total += 1;
        if record.i_buzz >= config.buzz_index() {
            cell.feed_buzz += 1;
        }
    }

    Ok(table.into_values().flatten().collect())
}
