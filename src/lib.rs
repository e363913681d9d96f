//! Blue ink stamp detection on scanned sheets.
//!
//! Each sheet goes through [mask::build_stamp_mask], [contours::find_stamp_contours]
//! and [classify::classify_sides]; [detector::StampDetector] runs that over a folder
//! and writes the CSV report.

pub mod classify;
pub mod config;
pub mod contours;
pub mod detector;
pub mod error;
pub mod mask;
pub mod report;
pub mod utils;

pub use classify::StampRecord;
pub use config::DetectorConfig;
pub use detector::{detect, Detection, StampDetector};
pub use error::{Result, StampError};
pub use report::StampReport;
