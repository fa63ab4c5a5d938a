//! # nox-filename
//!
//! Filename grammars for field-survey exports.
//!
//! Detector recordings and bat-box photographs both embed their metadata in
//! the filename. Five field seasons of hand-labelled media accumulated a
//! small set of recurring typo patterns, so extraction works as independent
//! regex searches with an explicit fallback order rather than a single
//! structured tokenizer. The fallback order is part of the dataset
//! definition: changing it re-attributes historical recordings.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `detector` | Recording filenames: validity gate, timestamp, deployment |
//! | `images` | Bat-box photograph filenames from the image-analysis export |
//! | `fixup` | Post-parse hardware renumbering corrections |
//! | `error` | Error types |

mod detector;
mod error;
mod fixup;
mod images;

pub use detector::{Deployment, extract_deployment, extract_time, is_valid_filename};
pub use error::FilenameError;
pub use fixup::fix_box_number;
pub use images::{AreaKind, ImageMeta, parse_image_filename};
