//! Configuration for the feeding-buzz and bout datasets.

use nox_ingest::NormalizedRecord;

/// Configuration shared by the feeding-buzz and bout analyses.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use nox_buzz::BuzzConfig;
///
/// let config = BuzzConfig::default()
///     .with_buzz_index(3)
///     .with_gap_seconds(60);
///
/// assert_eq!(config.gap_seconds(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct BuzzConfig {
    /// Restrict the analysis to records with this final identification.
    /// `None` keeps every record.
    final_id: Option<String>,
    /// Minimum `i_buzz` value that counts as a feeding buzz.
    buzz_index: i64,
    /// Minimum silence, in seconds, that separates two activity bouts.
    gap_seconds: i64,
}

impl Default for BuzzConfig {
    /// Defaults: common pipistrelle only (`PippiT`), buzz index `2`,
    /// 30-second gaps.
    fn default() -> Self {
        Self {
            final_id: Some("PippiT".to_string()),
            buzz_index: 2,
            gap_seconds: 30,
        }
    }
}

impl BuzzConfig {
    /// Sets the final-identification filter; `None` disables filtering.
    pub fn with_final_id(mut self, final_id: Option<String>) -> Self {
        self.final_id = final_id;
        self
    }

    /// Sets the minimum feeding-buzz index.
    pub fn with_buzz_index(mut self, buzz_index: i64) -> Self {
        self.buzz_index = buzz_index;
        self
    }

    /// Sets the bout-separating gap width in seconds.
    pub fn with_gap_seconds(mut self, gap_seconds: i64) -> Self {
        self.gap_seconds = gap_seconds;
        self
    }

    /// Returns the final-identification filter.
    pub fn final_id(&self) -> Option<&str> {
        self.final_id.as_deref()
    }

    /// Returns the minimum feeding-buzz index.
    pub fn buzz_index(&self) -> i64 {
        self.buzz_index
    }

    /// Returns the bout-separating gap width in seconds.
    pub fn gap_seconds(&self) -> i64 {
        self.gap_seconds
    }

    /// Whether `record` passes the final-identification filter.
    pub(crate) fn matches(&self, record: &NormalizedRecord) -> bool {
        match &self.final_id {
            Some(id) => record.final_id == *id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuzzConfig::default();
        assert_eq!(config.final_id(), Some("PippiT"));
        assert_eq!(config.buzz_index(), 2);
        assert_eq!(config.gap_seconds(), 30);
    }

    #[test]
    fn builders_override() {
        let config = BuzzConfig::default()
            .with_final_id(None)
            .with_buzz_index(1)
            .with_gap_seconds(120);
        assert_eq!(config.final_id(), None);
        assert_eq!(config.buzz_index(), 1);
        assert_eq!(config.gap_seconds(), 120);
    }
}
