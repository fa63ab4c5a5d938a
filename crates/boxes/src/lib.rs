//! # nox-boxes
//!
//! Bat-box datasets: the handwritten inspection log and the droppings
//! photographs.
//!
//! Forty bat boxes hang along the survey transects; inspections record
//! droppings, occupants, and body measurements, and the box floors are
//! photographed for droppings-area quantification. Both sources share the
//! box-door renumbering correction and the transect-register join, and
//! each produces flat per-transect or per-measurement datasets.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `survey` | Inspection log: occupancy, body measurements, sex counts |
//! | `images` | Droppings quantification from photographs |
//! | `writer` | Delimited-text output |
//! | `error` | Error types |

mod error;
mod images;
mod survey;
mod writer;

pub use error::BoxesError;
pub use images::{BoxImageRow, image_dataset};
pub use survey::{
    BodyMeasurementRow, BoxObservation, OccupancyRow, SexCountRow, body_measurement_dataset,
    load_box_survey, occupancy_dataset, sex_count_dataset,
};
pub use writer::{write_body_measurements, write_box_images, write_occupancy, write_sex_counts};
