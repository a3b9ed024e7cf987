use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All different error types this crate uses.
#[derive(Error, Debug)]
pub enum PostdumpError {
    /// Failed to open, read, create or write a file or directory.
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        /// The file or directory that was accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The post dump is not well-formed XML.
    #[error("Malformed XML in {} at byte {position}: {source}", path.display())]
    Xml {
        /// The dump that failed to parse.
        path: PathBuf,
        /// Byte offset of the reader when the error occurred.
        position: usize,
        /// The quick-xml error.
        source: quick_xml::Error,
    },
    /// The dump ended while the root element was still open.
    #[error("Unexpected end of {}, root element is not closed", path.display())]
    UnexpectedEof {
        /// The truncated dump.
        path: PathBuf,
    },
    /// The dump contains no element at all.
    #[error("No root element found in {}", path.display())]
    NoRootElement {
        /// The empty dump.
        path: PathBuf,
    },
    /// A second top level element follows the closed root.
    #[error("Junk after the root element in {}", path.display())]
    MultipleRootElements {
        /// The offending dump.
        path: PathBuf,
    },
    /// Non whitespace text before or after the root element.
    #[error("Text outside the root element in {}", path.display())]
    TextOutsideRoot {
        /// The offending dump.
        path: PathBuf,
    },
    /// Failed to serialize a post as csv.
    #[error("Failed to write csv to {}: {source}", path.display())]
    Csv {
        /// The destination csv file.
        path: PathBuf,
        /// The csv error.
        source: csv::Error,
    },
}
