//! # nox-reference
//!
//! Small lookup tables shared by every dataset builder: the transect
//! register, the sunrise/sunset night table, and the per-site night
//! calendars (allowed nights and lights-off nights).
//!
//! Each table is loaded once per run into an immutable value and passed
//! explicitly to the pipeline stages that need it; there is no ambient
//! state. Missing keys at lookup time are fatal by design: the correctness
//! of every downstream count depends on reference tables that are
//! consistent with the survey data.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `transects` | Transect -> site/colour register |
//! | `sun` | Solar-noon night table and the night index resolver |
//! | `nights` | Allowed-night and lights-off calendars per site |
//! | `set` | Bundle loading all four files |
//! | `error` | Error types |

mod error;
mod nights;
mod set;
mod sun;
mod transects;

pub use error::ReferenceError;
pub use nights::NightCalendar;
pub use set::{ReferencePaths, ReferenceSet};
pub use sun::SunTable;
pub use transects::{TransectInfo, Transects};
