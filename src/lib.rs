//! Convert StackExchange `Posts.xml` dumps into flat `id,text` csv datasets.
//!
//! Every `row` of a dump becomes a [`Post`] whose text is the title followed
//! by the html stripped body. Posts with a short text are dropped and only the
//! first [`Config::max_posts`] qualifying posts of a dump are kept.

pub use clean::{DefaultHtmlCleaner, HtmlCleaner};
pub use config::{Config, ConfigBuilder};
pub use dump::{extract_posts, extract_posts_with_config, PostDump};
pub use error::PostdumpError;
pub use post::{Post, RawPost};
pub use registry::{DatasetJob, JobReport, Registry};
pub use store::CsvStore;

pub mod clean;
pub mod config;
pub mod dump;
mod error;
pub mod post;
pub mod registry;
pub mod store;

/// Rexported to implement custom cleaners.
pub use select;
