//! Recording filename grammar: validity gate, timestamp, and deployment.

use std::sync::LazyLock;

use regex::Regex;

use nox_calendar::SurveyTime;

use crate::error::FilenameError;

/// One batch of recordings was renamed with a wrong date stamp on
/// 2013-08-27; names carrying this prefix are unusable.
const CORRUPTED_BATCH_PREFIX: &str = "20130827";

/// Either an 8-digit date followed by more digits, or a 3-plus-letter site
/// code immediately followed by a 20xx year.
static VALID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{8}_[0-9]+|[a-zA-Z]{3}[a-zA-Z]*?20[0-9]{2}").expect("valid pattern compiles")
});

/// Compact `YYYYMMDD_HHMMSS` timestamp anywhere in the name.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})_([0-9]{2})([0-9]{2})([0-9]{2})")
        .expect("time pattern compiles")
});

/// Transect token. Tolerates the `tr_##` typo (underscore before the digits)
/// and the periphery-experiment `c`/`C` suffix, which is not retained.
static TRANSECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tr_*?([0-9]+)[cC]*?_").expect("transect pattern compiles"));

/// Primary detector token: `d<digits>_`.
static DETECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"d([0-9]+)_").expect("detector pattern compiles"));

/// Fallback for names missing the `d` prefix: the digits between the
/// transect token and the compact-flash token. Tried only after
/// [`DETECTOR_RE`] fails; the order is part of the grammar.
static DETECTOR_POSITIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tr[0-9]+_([0-9]+)_cf").expect("positional pattern compiles"));

/// Compact-flash card token. One card in the field pool carries an `a`
/// suffix after its number.
static CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cf([0-9]+[aA]*?)_").expect("card pattern compiles"));

/// The physical deployment a recording came from, parsed from its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Survey transect number.
    pub transect: u32,
    /// Detector unit number.
    pub detector: u32,
    /// Compact-flash card identifier (digits, optionally suffixed `a`/`A`).
    pub card: String,
}

/// Returns whether `filename` is a usable detector recording name.
///
/// True iff the name matches one of the two historical naming conventions
/// and is not part of the corrupted 2013-08-27 rename batch. Classifier
/// header lines fail both patterns, so this function doubles as the
/// pipeline's header/junk gate; there is no separate header-detection path.
pub fn is_valid_filename(filename: &str) -> bool {
    VALID_RE.is_match(filename) && !filename.starts_with(CORRUPTED_BATCH_PREFIX)
}

/// Extracts the `YYYYMMDD_HHMMSS` timestamp from `filename`.
///
/// # Errors
///
/// Returns [`FilenameError::TimeNotFound`] if the pattern is absent and
/// [`FilenameError::Calendar`] if the matched digits are not a real
/// calendar time. Callers must gate on [`is_valid_filename`] first.
pub fn extract_time(filename: &str) -> Result<SurveyTime, FilenameError> {
    let caps = TIME_RE
        .captures(filename)
        .ok_or_else(|| FilenameError::TimeNotFound {
            filename: filename.to_string(),
        })?;
    let field = |i: usize, name: &'static str| -> Result<u32, FilenameError> {
        caps[i]
            .parse()
            .map_err(|_| FilenameError::NumberOutOfRange {
                field: name,
                filename: filename.to_string(),
            })
    };
    let year = field(1, "year")? as i32;
    SurveyTime::new(
        year,
        field(2, "month")?,
        field(3, "day")?,
        field(4, "hour")?,
        field(5, "minute")?,
        field(6, "second")?,
    )
    .map_err(|source| FilenameError::Calendar {
        filename: filename.to_string(),
        source,
    })
}

/// Extracts transect, detector, and compact-flash card from `filename`.
///
/// The three sub-extractions are independent searches over the whole name.
/// Detector extraction tries the `d<digits>_` token first and only then the
/// positional `tr<digits>_<digits>_cf` fallback, covering a typo class where
/// the `d` prefix was dropped.
///
/// # Errors
///
/// Returns the corresponding [`FilenameError`] variant for whichever token
/// is missing.
pub fn extract_deployment(filename: &str) -> Result<Deployment, FilenameError> {
    let transect = capture_u32(&TRANSECT_RE, filename, "transect").ok_or_else(|| {
        FilenameError::TransectNotFound {
            filename: filename.to_string(),
        }
    })??;

    let detector = match capture_u32(&DETECTOR_RE, filename, "detector") {
        Some(parsed) => parsed?,
        None => capture_u32(&DETECTOR_POSITIONAL_RE, filename, "detector").ok_or_else(|| {
            FilenameError::DetectorNotFound {
                filename: filename.to_string(),
            }
        })??,
    };

    let card = CARD_RE
        .captures(filename)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| FilenameError::CardNotFound {
            filename: filename.to_string(),
        })?;

    Ok(Deployment {
        transect,
        detector,
        card,
    })
}

/// Runs `re` over `filename` and parses capture group 1 as `u32`.
///
/// `None` means the pattern did not match; the inner `Result` reports a
/// digit run too long for `u32`.
fn capture_u32(
    re: &Regex,
    filename: &str,
    field: &'static str,
) -> Option<Result<u32, FilenameError>> {
    re.captures(filename).map(|caps| {
        caps[1]
            .parse()
            .map_err(|_| FilenameError::NumberOutOfRange {
                field,
                filename: filename.to_string(),
            })
    })
}
