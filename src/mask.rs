//! Blue ink mask: HSV range, blur, re-threshold, dilate.

use opencv::{
    core::{self, Mat, Point, Scalar, Size, BORDER_CONSTANT, BORDER_DEFAULT},
    imgproc::{
        self, cvt_color, gaussian_blur, threshold, COLOR_BGR2HSV, MORPH_ELLIPSE, THRESH_BINARY,
    },
    prelude::*,
};

use crate::error::Result;

/// Lower HSV bound of stamp ink. Hue is wide on purpose, ink shades vary a lot.
pub const LOWER_BLUE: (f64, f64, f64) = (60.0, 30.0, 50.0);
pub const UPPER_BLUE: (f64, f64, f64) = (180.0, 255.0, 255.0);

const BLUR_KERNEL: i32 = 9;
const BLUR_SIGMA: f64 = 3.0;
const BINARY_THRESHOLD: f64 = 50.0;
const DILATE_KERNEL: i32 = 3;
const DILATE_ITERATIONS: i32 = 2;

pub fn bgr_to_hsv(image: &Mat) -> Result<Mat> {
    let mut hsv = Mat::default();
    cvt_color(image, &mut hsv, COLOR_BGR2HSV, 0)?;
    Ok(hsv)
}

fn hsv_scalar((h, s, v): (f64, f64, f64)) -> Scalar {
    Scalar::new(h, s, v, 0.0)
}

/// Builds the binary (0/255) single channel mask of blue ink for a BGR image.
///
/// The blur spreads real ink blobs so the low threshold keeps them whole while
/// isolated speckles fall under it. Two dilations then close broken outlines.
pub fn build_stamp_mask(image: &Mat) -> Result<Mat> {
    let hsv = bgr_to_hsv(image)?;

    let mut in_range = Mat::default();
    core::in_range(
        &hsv,
        &hsv_scalar(LOWER_BLUE),
        &hsv_scalar(UPPER_BLUE),
        &mut in_range,
    )?;

    let mut blurred = Mat::default();
    gaussian_blur(
        &in_range,
        &mut blurred,
        Size::new(BLUR_KERNEL, BLUR_KERNEL),
        BLUR_SIGMA,
        BLUR_SIGMA,
        BORDER_DEFAULT,
    )?;

    let mut binary = Mat::default();
    threshold(&blurred, &mut binary, BINARY_THRESHOLD, 255.0, THRESH_BINARY)?;

    let kernel = imgproc::get_structuring_element(
        MORPH_ELLIPSE,
        Size::new(DILATE_KERNEL, DILATE_KERNEL),
        Point::new(-1, -1),
    )?;
    let mut dilated = Mat::default();
    imgproc::dilate(
        &binary,
        &mut dilated,
        &kernel,
        Point::new(-1, -1),
        DILATE_ITERATIONS,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    Ok(dilated)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use opencv::core::{self, Rect, Vec3b, CV_8UC1, CV_8UC3};
    use opencv::imgproc::{rectangle, FILLED, LINE_8};

    pub(crate) const WHITE: (f64, f64, f64) = (255.0, 255.0, 255.0);
    pub(crate) const BLUE: (f64, f64, f64) = (255.0, 0.0, 0.0);

    /// 200x100 BGR sheet of one color.
    pub(crate) fn sheet((b, g, r): (f64, f64, f64)) -> Mat {
        Mat::new_rows_cols_with_default(100, 200, CV_8UC3, Scalar::new(b, g, r, 0.0)).unwrap()
    }

    /// Fills a `side`x`side` square centered on (`cx`, `cy`).
    pub(crate) fn paint_square(image: &mut Mat, cx: i32, cy: i32, side: i32, (b, g, r): (f64, f64, f64)) {
        let rect = Rect::new(cx - side / 2, cy - side / 2, side, side);
        rectangle(image, rect, Scalar::new(b, g, r, 0.0), FILLED, LINE_8, 0).unwrap();
    }

    #[test]
    fn white_sheet_gives_empty_mask() {
        let mask = build_stamp_mask(&sheet(WHITE)).unwrap();
        assert_eq!(core::count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn mask_is_single_channel_and_same_size() {
        let mut image = sheet(WHITE);
        paint_square(&mut image, 50, 50, 32, BLUE);
        let mask = build_stamp_mask(&image).unwrap();
        assert_eq!(mask.typ(), CV_8UC1);
        assert_eq!(mask.size().unwrap(), image.size().unwrap());
    }

    #[test]
    fn blue_square_is_kept_and_grown() {
        let mut image = sheet(WHITE);
        paint_square(&mut image, 50, 50, 32, BLUE);
        let mask = build_stamp_mask(&image).unwrap();
        let on = core::count_non_zero(&mask).unwrap();
        assert!(on > 32 * 32, "mask should cover and grow the square, got {on}");
        assert_eq!(*mask.at_2d::<u8>(50, 50).unwrap(), 255);
        assert_eq!(*mask.at_2d::<u8>(50, 150).unwrap(), 0);
    }

    #[test]
    fn isolated_speck_is_suppressed() {
        let mut image = sheet(WHITE);
        paint_square(&mut image, 100, 50, 1, BLUE);
        let mask = build_stamp_mask(&image).unwrap();
        assert_eq!(core::count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn red_and_black_ink_are_ignored() {
        let mut image = sheet(WHITE);
        paint_square(&mut image, 50, 50, 32, (0.0, 0.0, 255.0));
        paint_square(&mut image, 150, 50, 32, (0.0, 0.0, 0.0));
        let mask = build_stamp_mask(&image).unwrap();
        assert_eq!(core::count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn hsv_conversion_of_pure_blue() {
        let hsv = bgr_to_hsv(&sheet(BLUE)).unwrap();
        let px = hsv.at_2d::<Vec3b>(0, 0).unwrap();
        assert_eq!(px.0, [120, 255, 255]);
    }
}
