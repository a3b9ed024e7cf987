use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Max. number of qualifying posts to keep per dataset.
    max_posts: usize,
    /// A post qualifies only if its text has more chars than this.
    min_text_chars: usize,
    /// Directory the csv files are written to.
    output_dir: PathBuf,
}

impl Config {
    /// Default cutoff of posts per dataset.
    pub const DEFAULT_MAX_POSTS: usize = 1_000;

    /// Default length a post's text must exceed.
    pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

    /// Default directory for the csv datasets.
    pub const DEFAULT_OUTPUT_DIR: &'static str = "./csv_datasets/original_csv";

    /// Convenience method to create a [`ConfigBuilder`]
    #[inline]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    #[inline]
    pub fn max_posts(&self) -> usize {
        self.max_posts
    }

    #[inline]
    pub fn min_text_chars(&self) -> usize {
        self.min_text_chars
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    /// Max. number of qualifying posts to keep per dataset.
    max_posts: Option<usize>,
    /// A post qualifies only if its text has more chars than this.
    min_text_chars: Option<usize>,
    /// Directory the csv files are written to.
    output_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn max_posts(mut self, max_posts: usize) -> Self {
        self.max_posts = Some(max_posts);
        self
    }

    pub fn min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = Some(min_text_chars);
        self
    }

    pub fn output_dir<T: AsRef<Path>>(mut self, output_dir: T) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Config {
        Config {
            max_posts: self.max_posts.unwrap_or(Config::DEFAULT_MAX_POSTS),
            min_text_chars: self
                .min_text_chars
                .unwrap_or(Config::DEFAULT_MIN_TEXT_CHARS),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_OUTPUT_DIR)),
        }
    }
}
