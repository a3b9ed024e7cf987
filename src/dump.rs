//! Streaming reader for StackExchange `Posts.xml` dumps.
//!
//! A dump is a single root element with a flat list of `row` children, each
//! carrying its data as attributes:
//!
//! ```xml
//! <posts>
//!   <row Id="1" Title="How do I ...?" Body="&lt;p&gt;...&lt;/p&gt;" />
//! </posts>
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::config::Config;
use crate::error::PostdumpError;
use crate::post::{attribute_value, Post, RawPost};

/// Name of the elements that hold a post.
pub const ROW: &[u8] = b"row";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootState {
    /// No element read yet.
    Pending,
    Open,
    Closed,
}

/// What a single xml event means for the dump.
enum Step {
    Start(Option<RawPost>),
    Empty(Option<RawPost>),
    End,
    Eof,
    Skip,
}

pub struct PostDump<R: BufRead> {
    reader: Reader<R>,
    /// Where the dump was read from, for error reporting.
    path: PathBuf,
    buf: Vec<u8>,
    /// Number of currently open elements.
    depth: usize,
    root: RootState,
}

impl PostDump<BufReader<File>> {
    /// Open the dump at `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PostdumpError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PostdumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PostDump::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> PostDump<R> {
    pub fn from_reader<P: AsRef<Path>>(reader: R, path: P) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            path: path.as_ref().to_path_buf(),
            buf: Vec::new(),
            depth: 0,
            root: RootState::Pending,
        }
    }

    /// Returns the next `row` child of the root element, or `None` once the
    /// whole document has been read.
    ///
    /// Elements nested inside a `row`, or children of the root with another
    /// name, are skipped.
    pub fn next_row(&mut self) -> Result<Option<RawPost>, PostdumpError> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(PostdumpError::Xml {
                        path: self.path.clone(),
                        position: self.reader.buffer_position(),
                        source,
                    })
                }
            };

            let position = self.reader.buffer_position();
            let step = match event {
                Event::Start(ref e) => {
                    Step::Start(read_row(self.depth, e, &self.path, position)?)
                }
                Event::Empty(ref e) => {
                    Step::Empty(read_row(self.depth, e, &self.path, position)?)
                }
                Event::Text(ref t) => {
                    check_text(self.root, t, &self.path, position)?;
                    Step::Skip
                }
                Event::End(_) => Step::End,
                Event::Eof => Step::Eof,
                _ => Step::Skip,
            };

            match step {
                Step::Start(row) => {
                    if self.depth == 0 {
                        self.enter_root()?;
                    }
                    self.depth += 1;
                    if row.is_some() {
                        return Ok(row);
                    }
                }
                Step::Empty(row) => {
                    if self.depth == 0 {
                        self.enter_root()?;
                        self.root = RootState::Closed;
                    }
                    if row.is_some() {
                        return Ok(row);
                    }
                }
                Step::End => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 0 {
                        self.root = RootState::Closed;
                    }
                }
                Step::Eof => {
                    return match self.root {
                        RootState::Pending => Err(PostdumpError::NoRootElement {
                            path: self.path.clone(),
                        }),
                        RootState::Open => Err(PostdumpError::UnexpectedEof {
                            path: self.path.clone(),
                        }),
                        RootState::Closed => Ok(None),
                    };
                }
                Step::Skip => {}
            }
        }
    }

    /// Collect the first `config.max_posts()` qualifying posts in document
    /// order.
    ///
    /// Once the cutoff is reached the rest of the document is still read, so
    /// a dump that is malformed anywhere is rejected as a whole.
    pub fn extract(mut self, config: &Config) -> Result<Vec<Post>, PostdumpError> {
        let max_posts = config.max_posts();
        let mut posts = Vec::with_capacity(max_posts.min(1024));
        let mut rows = 0usize;
        let mut skipped = 0usize;

        while let Some(raw) = self.next_row()? {
            rows += 1;
            if posts.len() >= max_posts {
                continue;
            }
            let post = raw.compose();
            if post.is_qualifying(config.min_text_chars()) {
                posts.push(post);
            } else {
                skipped += 1;
            }
        }

        debug!(
            "{}: read {} rows, kept {}, skipped {} short posts",
            self.path.display(),
            rows,
            posts.len(),
            skipped
        );
        if posts.len() < max_posts {
            warn!(
                "{}: only {} of {} posts qualify",
                self.path.display(),
                posts.len(),
                max_posts
            );
        }
        Ok(posts)
    }

    fn enter_root(&mut self) -> Result<(), PostdumpError> {
        if self.root == RootState::Closed {
            return Err(PostdumpError::MultipleRootElements {
                path: self.path.clone(),
            });
        }
        self.root = RootState::Open;
        Ok(())
    }
}

/// Attributes of `e` if it is a `row` directly below the root.
///
/// The attributes of any other element are only validated.
fn read_row(
    depth: usize,
    e: &BytesStart,
    path: &Path,
    position: usize,
) -> Result<Option<RawPost>, PostdumpError> {
    let row = if depth == 1 && e.name().as_ref() == ROW {
        RawPost::from_element(e).map(Some)
    } else {
        check_attributes(e).map(|_| None)
    };
    row.map_err(|source| PostdumpError::Xml {
        path: path.to_path_buf(),
        position,
        source,
    })
}

fn check_attributes(e: &BytesStart) -> Result<(), quick_xml::Error> {
    for attr in e.attributes() {
        attribute_value(&attr?)?;
    }
    Ok(())
}

/// Only whitespace may surround the root, text inside it must unescape.
fn check_text(
    root: RootState,
    text: &BytesText,
    path: &Path,
    position: usize,
) -> Result<(), PostdumpError> {
    if root == RootState::Open {
        return text.unescape().map(|_| ()).map_err(|source| PostdumpError::Xml {
            path: path.to_path_buf(),
            position,
            source,
        });
    }
    if text.iter().all(u8::is_ascii_whitespace) {
        Ok(())
    } else {
        Err(PostdumpError::TextOutsideRoot {
            path: path.to_path_buf(),
        })
    }
}

/// Extract up to `max_posts` qualifying posts from the dump at `xml_path`.
pub fn extract_posts<P: AsRef<Path>>(
    xml_path: P,
    max_posts: usize,
) -> Result<Vec<Post>, PostdumpError> {
    extract_posts_with_config(xml_path, &Config::builder().max_posts(max_posts).build())
}

pub fn extract_posts_with_config<P: AsRef<Path>>(
    xml_path: P,
    config: &Config,
) -> Result<Vec<Post>, PostdumpError> {
    PostDump::open(xml_path)?.extract(config)
}
