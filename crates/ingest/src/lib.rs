//! # nox-ingest
//!
//! The detector-classifier ingestion pipeline: raw SonoChiro output lines
//! in, normalized dataset records out.
//!
//! Every input line passes through a fixed sequence of states:
//!
//! ```text
//! Received -> Skipped                    (filename fails the validity gate)
//! Received -> Parsed -> Excluded        (night not allowed, or lights off)
//! Received -> Parsed -> Included        (a NormalizedRecord is emitted)
//! ```
//!
//! Skips are recorded per line for audit; exclusions are counted in
//! aggregate only. Anything else — a numeric field that does not parse, a
//! transect or site missing from the reference tables, a timestamp past the
//! sun table — aborts the run, because silent repair would corrupt every
//! downstream count.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `record` | Output record, skip record, run accounting |
//! | `pipeline` | The per-line state machine and file orchestration |
//! | `writer` | Delimited-text output |
//! | `error` | Error types |

mod error;
mod pipeline;
mod record;
mod writer;

pub use error::IngestError;
pub use pipeline::{HEADER_SENTINEL, ingest_files, ingest_reader};
pub use record::{COLUMNS, IngestOutput, NormalizedRecord, SkipReason, SkipRecord};
pub use writer::{write_records, write_skips};
