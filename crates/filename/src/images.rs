//! Bat-box photograph filename grammar from the image-analysis export.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FilenameError;

/// `tr<t>_k<box>_<YYYYMMDD>_<seq>_IMG_<n>_(oval|particles).csv`
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"tr([0-9]+)_k([0-9]+)_([0-9]{4})([0-9]{2})([0-9]{2})_[0-9]+_IMG_[0-9]+_(oval|particles)\.csv",
    )
    .expect("image pattern compiles")
});

/// Which area a photograph measurement row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    /// The oval selection covering the whole box floor (total area).
    Oval,
    /// Thresholded droppings particles inside the selection.
    Particles,
}

/// Metadata embedded in one image-analysis output filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    /// Survey transect number.
    pub transect: u32,
    /// Bat-box number as written on the door (see
    /// [`crate::fix_box_number`]).
    pub box_number: u32,
    /// Photograph year.
    pub year: i32,
    /// Photograph month.
    pub month: u32,
    /// Photograph day.
    pub day: u32,
    /// Whether this file holds the oval or the particle measurements.
    pub kind: AreaKind,
}

/// Parses an image-analysis output filename.
///
/// # Errors
///
/// Returns [`FilenameError::ImageNameMismatch`] if the name does not match
/// the photograph grammar.
pub fn parse_image_filename(filename: &str) -> Result<ImageMeta, FilenameError> {
    let caps = IMAGE_RE
        .captures(filename)
        .ok_or_else(|| FilenameError::ImageNameMismatch {
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
    let kind = match &caps[6] {
        "oval" => AreaKind::Oval,
        _ => AreaKind::Particles,
    };
    Ok(ImageMeta {
        transect: field(1, "transect")?,
        box_number: field(2, "box")?,
        year: field(3, "year")? as i32,
        month: field(4, "month")?,
        day: field(5, "day")?,
        kind,
    })
}
