use log::debug;
use opencv::{
    core::{Mat, Point, Scalar, Vector},
    imgproc::{self, CHAIN_APPROX_SIMPLE, LINE_8, RETR_EXTERNAL},
    prelude::*,
};

use crate::error::Result;

pub type Contour = Vector<Point>;
pub type Contours = Vector<Contour>;

/// Contours with an area at or below this are leftover noise.
pub const MIN_STAMP_AREA: f64 = 500.0;

const CONTOUR_THICKNESS: i32 = 3;

fn contour_color() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

/// Outer contours of the mask that are large enough to be a stamp.
pub fn find_stamp_contours(mask: &Mat) -> Result<Contours> {
    let mut contours = Contours::new();
    imgproc::find_contours(
        mask,
        &mut contours,
        RETR_EXTERNAL,
        CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;
    let found = contours.len();
    let stamps = filter_by_area(&contours)?;
    debug!("find_stamp_contours | {} of {} contours kept", stamps.len(), found);
    Ok(stamps)
}

/// Keeps contours whose area is strictly greater than [MIN_STAMP_AREA].
pub fn filter_by_area(contours: &Contours) -> Result<Contours> {
    let mut kept = Contours::new();
    for contour in contours.iter() {
        if imgproc::contour_area(&contour, false)? > MIN_STAMP_AREA {
            kept.push(contour);
        }
    }
    Ok(kept)
}

/// Returns a copy of `image` with `contours` outlined in green.
/// The input image is left untouched.
pub fn draw_stamp_contours(image: &Mat, contours: &Contours) -> Result<Mat> {
    let mut annotated = image.try_clone()?;
    if contours.is_empty() {
        return Ok(annotated);
    }
    imgproc::draw_contours(
        &mut annotated,
        contours,
        -1,
        contour_color(),
        CONTOUR_THICKNESS,
        LINE_8,
        &Mat::default(),
        i32::MAX,
        Point::new(0, 0),
    )?;
    Ok(annotated)
}
