use std::ffi::OsString;
use std::fs;
use std::path::Path;

use log::debug;
use opencv::{core::Mat, highgui, imgcodecs, prelude::*};

use crate::error::{Result, StampError};

/// Names of the entries of `dir`, sorted so reports come out in the same order on every filesystem.
pub fn list_sheet_names(dir: &Path) -> Result<Vec<OsString>> {
    let read_dir_error = |source: std::io::Error| StampError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = fs::read_dir(dir)
        .map_err(read_dir_error)?
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_dir_error)?;
    names.sort();
    Ok(names)
}

/// Decodes a color image, `None` when the file can't be read as one.
pub fn read_image(path: &Path) -> Option<Mat> {
    let Some(path_str) = path.to_str() else {
        debug!("read_image | non UTF-8 path {:?}", path);
        return None;
    };
    match imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR) {
        Ok(image) if !image.empty() => Some(image),
        Ok(_) => None,
        Err(err) => {
            debug!("read_image | {:?}: {}", path, err);
            None
        }
    }
}

/// Encodes `image` to `path`, format picked from the extension. `false` on any failure.
pub fn write_image(path: &Path, image: &Mat) -> bool {
    let Some(path_str) = path.to_str() else {
        return false;
    };
    match imgcodecs::imwrite(path_str, image, &opencv::core::Vector::new()) {
        Ok(saved) => saved,
        Err(err) => {
            debug!("write_image | {:?}: {}", path, err);
            false
        }
    }
}

pub fn show_image(title: &str, image: &Mat) -> Result<()> {
    highgui::imshow(title, image)?;
    highgui::wait_key(0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "c.jpg", "a.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let names = list_sheet_names(dir.path()).unwrap();
        let expected: Vec<OsString> = ["a.png", "b.png", "c.jpg"].into_iter().map(OsString::from).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_sheet_names(&missing),
            Err(StampError::ReadDir { .. })
        ));
    }

    #[test]
    fn garbage_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();
        assert!(read_image(&path).is_none());
        assert!(read_image(&dir.path().join("absent.png")).is_none());
    }
}
