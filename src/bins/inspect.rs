use std::path::PathBuf;

use dotenv::dotenv;
use log::{error, info};
use stamp_detector::{detect, utils::{read_image, show_image}};

fn main() -> stamp_detector::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        error!("usage: inspect <image>");
        std::process::exit(2);
    };
    let Some(image) = read_image(&path) else {
        error!("Failed to read: {:?}", path);
        std::process::exit(1);
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let detection = detect(&image, &filename)?;
    info!(
        "{}: {} stamp contour(s), performer: {}, customer: {}",
        filename,
        detection.contours.len(),
        detection.record.performer,
        detection.record.customer,
    );
    show_image("Stamp mask", &detection.mask)?;
    show_image("Stamp contours", &detection.annotated)?;
    Ok(())
}
