//! Bounded 2D fields addressed by integer cell coordinates.
//!
//! [`GridField`] is the storage leaf underneath both the belief estimator's
//! probability map and the spatial reasoner's distance/score maps. It is
//! deliberately dumb: bounds-checked get/set, bulk reset, and max extraction
//! with a reproducible scan-order tie-break.
mod cell;
mod field;

pub use cell::{CellFlags, CellRef, GridBounds};
pub use field::GridField;
