//! Pure conversion functions: TOML config structs -> crate API config types.

use nox_buzz::BuzzConfig;
use nox_reference::ReferencePaths;

use crate::config::{BuzzToml, ReferenceToml};

/// Builds a [`ReferencePaths`] from the TOML reference configuration.
pub fn build_reference_paths(reference: &ReferenceToml) -> ReferencePaths {
    ReferencePaths {
        transects: reference.transects.clone(),
        sun_data: reference.sun_data.clone(),
        allowed_nights: reference.allowed_nights.clone(),
        lights_log: reference.lights_log.clone(),
    }
}

/// Builds a [`BuzzConfig`] from the TOML buzz configuration.
///
/// An empty `final_id` disables the species filter.
pub fn build_buzz_config(buzz: &BuzzToml) -> BuzzConfig {
    let final_id = if buzz.final_id.is_empty() {
        None
    } else {
        Some(buzz.final_id.clone())
    };
    BuzzConfig::default()
        .with_final_id(final_id)
        .with_buzz_index(buzz.buzz_index)
        .with_gap_seconds(buzz.gap_seconds)
}
