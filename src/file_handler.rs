use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{ImageFormat, RgbImage};

use crate::error::ExportError;
use crate::util::time;

/// Destination for exported artwork
pub trait ImageSink {
    /// Persist `image` under `file_name`, returning where it ended up
    fn write(&mut self, file_name: &str, image: &RgbImage) -> Result<PathBuf, ExportError>;
}

/// `artwork_<YYYYmmdd_HHMMSS>.<extension>` for the given local time
pub fn artwork_file_name(at: &DateTime<Local>, extension: &str) -> String {
    format!("artwork_{}.{}", time::format_timestamp(at), extension)
}

/// Writes images into a directory, encoding by file extension
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSink for DirectorySink {
    fn write(&mut self, file_name: &str, image: &RgbImage) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        let format = ImageFormat::from_path(&path).unwrap_or(ImageFormat::Png);
        image
            .save_with_format(&path, format)
            .map_err(|source| ExportError::Encode {
                path: path.clone(),
                source,
            })?;

        log::info!("Exported {}x{} image to {}", image.width(), image.height(), path.display());
        Ok(path)
    }
}

/// Keeps exports in memory; handy for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub written: Vec<(String, RgbImage)>,
    /// When set, every write fails with this message
    pub fail_with: Option<String>,
}

impl ImageSink for MemorySink {
    fn write(&mut self, file_name: &str, image: &RgbImage) -> Result<PathBuf, ExportError> {
        if let Some(reason) = &self.fail_with {
            return Err(ExportError::Rejected(reason.clone()));
        }
        self.written.push((file_name.to_owned(), image.clone()));
        Ok(PathBuf::from(file_name))
    }
}
