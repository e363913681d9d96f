//! Decides on which half of the sheet the stamps were put.
//!
//! Left half belongs to the performer ("Исполнитель"), right half to the
//! customer ("Заказчик"). The rule is deliberately coarse:
//!
//! * more than one stamp contour: both sides are stamped, positions are not
//!   checked individually;
//! * no contour: neither side is stamped;
//! * one contour: the integer centroid x is compared with `width / 2`. A
//!   centroid exactly on the midpoint marks neither side.

use log::debug;
use opencv::imgproc;

use crate::contours::{Contour, Contours};
use crate::error::Result;

/// Classification of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampRecord {
    pub filename: String,
    pub performer: bool,
    pub customer: bool,
}

impl StampRecord {
    pub fn new(filename: impl Into<String>, performer: bool, customer: bool) -> Self {
        Self {
            filename: filename.into(),
            performer,
            customer,
        }
    }
}

/// Integer x of the contour centroid, truncated like the pixel grid.
/// Degenerate contours (zero area) yield `fallback`.
pub fn centroid_x(contour: &Contour, fallback: i32) -> Result<i32> {
    let moments = imgproc::moments(contour, false)?;
    if moments.m00 != 0.0 {
        Ok((moments.m10 / moments.m00) as i32)
    } else {
        Ok(fallback)
    }
}

pub fn classify_sides(contours: &Contours, image_width: i32, filename: &str) -> Result<StampRecord> {
    let midpoint = image_width / 2;
    let record = match contours.len() {
        0 => StampRecord::new(filename, false, false),
        1 => {
            let x = centroid_x(&contours.get(0)?, midpoint)?;
            debug!("classify_sides | {filename}: centroid x {x}, midpoint {midpoint}");
            StampRecord::new(filename, x < midpoint, x > midpoint)
        }
        _ => StampRecord::new(filename, true, true),
    };
    Ok(record)
}
