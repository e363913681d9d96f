use std::time::Instant;

use log::{debug, info, warn};
use opencv::{core::Mat, prelude::*};

use crate::classify::{classify_sides, StampRecord};
use crate::config::DetectorConfig;
use crate::contours::{draw_stamp_contours, find_stamp_contours, Contours};
use crate::error::Result;
use crate::mask::build_stamp_mask;
use crate::report::StampReport;
use crate::utils::{list_sheet_names, read_image, write_image};

/// Everything the pipeline produced for one sheet.
pub struct Detection {
    pub mask: Mat,
    pub contours: Contours,
    /// Copy of the sheet with stamp contours drawn on it.
    pub annotated: Mat,
    pub record: StampRecord,
}

/// Runs mask, contour and side classification on one BGR sheet.
pub fn detect(image: &Mat, filename: &str) -> Result<Detection> {
    let mask = build_stamp_mask(image)?;
    let contours = find_stamp_contours(&mask)?;
    let annotated = draw_stamp_contours(image, &contours)?;
    let record = classify_sides(&contours, image.cols(), filename)?;
    Ok(Detection {
        mask,
        contours,
        annotated,
        record,
    })
}

/// Batch over a folder of scanned sheets: annotated copies go to
/// `save_dir`, one CSV row per readable sheet goes to `results_file`.
pub struct StampDetector {
    conf: DetectorConfig,
    report: StampReport,
}

impl StampDetector {
    pub fn new(conf: DetectorConfig) -> Self {
        Self {
            conf,
            report: StampReport::new(),
        }
    }

    pub fn report(&self) -> &StampReport {
        &self.report
    }

    /// Processes every entry of the read folder, then writes the report.
    /// Each call starts from an empty report.
    /// Per-sheet failures are logged and skipped; listing the folder or
    /// writing the report are the only errors returned.
    pub fn run(&mut self) -> Result<&StampReport> {
        let t = Instant::now();
        self.report = StampReport::new();
        let names = list_sheet_names(&self.conf.read_dir)?;
        info!("StampDetector.run | {} entries in {:?}", names.len(), self.conf.read_dir);
        for name in names {
            let filename = name.to_string_lossy().into_owned();
            let Some(image) = read_image(&self.conf.read_dir.join(&name)) else {
                warn!("Failed to read: {}", filename);
                continue;
            };
            let detection = match detect(&image, &filename) {
                Ok(detection) => detection,
                Err(err) => {
                    warn!("Failed to process: {}: {}", filename, err);
                    continue;
                }
            };
            debug!("StampDetector.run | {:?}", detection.record);
            self.report.push(detection.record);
            if !write_image(&self.conf.save_dir.join(&name), &detection.annotated) {
                warn!("Failed to save: {}", filename);
            }
        }
        self.report.write_csv(&self.conf.results_file)?;
        info!(
            "StampDetector.run | {} sheets classified | Elapsed: {:?}",
            self.report.len(),
            t.elapsed()
        );
        Ok(&self.report)
    }
}
