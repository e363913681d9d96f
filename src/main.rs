use dotenv::dotenv;
use stamp_detector::{DetectorConfig, StampDetector};

const FOLDER_READ: &str = "./Images/";
const FOLDER_SAVE: &str = "./Images_processed/";
const RESULTS_FILE: &str = "./stamps_list.csv";

fn main() -> stamp_detector::Result<()> {
    // Initialize the logger
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conf = DetectorConfig::from_env_or(DetectorConfig::new(FOLDER_READ, FOLDER_SAVE, RESULTS_FILE));
    StampDetector::new(conf).run()?;
    Ok(())
}
