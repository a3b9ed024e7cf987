use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::Config;
use crate::dump;
use crate::store::CsvStore;

/// The StackExchange communities converted by default, as
/// `(output file, input dump)`.
pub const STACKEXCHANGE_DATASETS: [(&str, &str); 3] = [
    (
        "codereview_raw.csv",
        "./xml_datasets/codereview.stackexchange.com/Posts.xml",
    ),
    (
        "webapps_raw.csv",
        "./xml_datasets/webapps.stackexchange.com/Posts.xml",
    ),
    (
        "workplace_raw.csv",
        "./xml_datasets/workplace.stackexchange.com/Posts.xml",
    ),
];

/// Convert a single dump into a single csv file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetJob {
    /// Name of the csv file inside the configured output directory.
    pub output_filename: String,
    pub input_path: PathBuf,
}

impl DatasetJob {
    pub fn new<F: ToString, P: AsRef<Path>>(output_filename: F, input_path: P) -> Self {
        Self {
            output_filename: output_filename.to_string(),
            input_path: input_path.as_ref().to_path_buf(),
        }
    }

    pub fn run(&self, config: &Config) -> Result<JobReport> {
        info!(
            "Extracting {} from {}",
            self.output_filename,
            self.input_path.display()
        );
        let posts = dump::extract_posts_with_config(&self.input_path, config).with_context(|| {
            format!("Failed to extract posts from {:?}", self.input_path)
        })?;

        let destination = CsvStore::new(config.output_dir())
            .write(&self.output_filename, &posts)
            .with_context(|| format!("Failed to write dataset {:?}", self.output_filename))?;

        Ok(JobReport {
            count: posts.len(),
            destination,
        })
    }
}

/// Outcome of a successful [`DatasetJob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Number of posts written.
    pub count: usize,
    pub destination: PathBuf,
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} posts to {}",
            self.count,
            self.destination.display()
        )
    }
}

/// An ordered list of jobs that are run one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    jobs: Vec<DatasetJob>,
}

impl Registry {
    pub fn new(jobs: Vec<DatasetJob>) -> Self {
        Self { jobs }
    }

    /// The codereview, webapps and workplace dumps.
    pub fn stackexchange() -> Self {
        Registry::new(
            STACKEXCHANGE_DATASETS
                .iter()
                .map(|(output, input)| DatasetJob::new(output, input))
                .collect(),
        )
    }

    #[inline]
    pub fn jobs(&self) -> impl Iterator<Item = &DatasetJob> {
        self.jobs.iter()
    }

    /// Run all jobs in order and print a status line to stdout after each
    /// one.
    ///
    /// The first failing job aborts the run, csv files of earlier jobs are
    /// kept.
    pub fn run(&self, config: &Config) -> Result<Vec<JobReport>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_status(config, &mut out)
    }

    /// Same as [`Registry::run`] but writes the status lines to `out`.
    pub fn run_with_status<W: Write>(
        &self,
        config: &Config,
        out: &mut W,
    ) -> Result<Vec<JobReport>> {
        let mut reports = Vec::with_capacity(self.jobs.len());
        for (i, job) in self.jobs.iter().enumerate() {
            let report = job.run(config)?;
            writeln!(out, "{}", report)?;
            debug!("job {}/{} done", i + 1, self.jobs.len());
            reports.push(report);
        }
        Ok(reports)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::stackexchange()
    }
}
