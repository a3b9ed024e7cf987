use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use log::debug;

use crate::error::PostdumpError;
use crate::post::Post;

/// Header row of every dataset.
pub const HEADER: [&str; 2] = ["id", "text"];

/// Writes datasets as csv files into a single directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new<T: AsRef<Path>>(dir: T) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write `posts` to `<dir>/<filename>` and return that path.
    ///
    /// The directory is created if missing, an existing file is overwritten.
    /// The header is written even if there are no posts.
    pub fn write(&self, filename: &str, posts: &[Post]) -> Result<PathBuf, PostdumpError> {
        fs::create_dir_all(&self.dir).map_err(|source| PostdumpError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let dest = self.dir.join(filename);
        let file = File::create(&dest).map_err(|source| PostdumpError::Io {
            path: dest.clone(),
            source,
        })?;

        let csv_err = |source| PostdumpError::Csv {
            path: dest.clone(),
            source,
        };
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record(&HEADER).map_err(csv_err)?;
        for post in posts {
            writer.serialize(post).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| PostdumpError::Io {
            path: dest.clone(),
            source,
        })?;

        debug!("wrote {} rows to {}", posts.len(), dest.display());
        Ok(dest)
    }
}
