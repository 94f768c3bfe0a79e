// src/cli.rs
use std::{
    io,
    path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    compare,
    config::{consts::*, PollOptions},
    poll::{self, CancelToken, PollOutcome, PollSession},
    progress::Progress,
    specs::CaseStatusClient,
    stats, store,
};

#[derive(Parser, Debug)]
#[command(name = "case_watch", version, about = "Get USCIS case status data")]
pub struct Args {
    /// Starting point of the query
    #[arg(long, default_value_t = DEFAULT_START_RANGE)]
    pub start_range: u32,

    /// Num of receipts to query from starting point
    #[arg(long, default_value_t = DEFAULT_NUM_ELTS)]
    pub num_elts: u32,

    /// Save raw data to CSV
    #[arg(long)]
    pub save_data: bool,

    /// Load raw data from previously saved CSV file
    #[arg(long, value_name = "FILENAME.csv")]
    pub load_data: Option<PathBuf>,

    /// Compare data from previously saved CSV files, oldest first
    #[arg(long, value_name = "FILE.csv", num_args = 2.., conflicts_with = "load_data")]
    pub compare_data: Option<Vec<PathBuf>>,

    /// Seconds to wait between requests
    #[arg(long, default_value_t = DEFAULT_WAIT_SECS)]
    pub wait: f64,

    /// Directory for saved snapshots
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}

/// What one invocation does. Load and compare skip polling entirely.
#[derive(Debug, PartialEq)]
pub enum Mode {
    Poll(PollOptions),
    Load(PathBuf, PollOptions),
    Compare(Vec<PathBuf>),
}

impl Args {
    /// Fails when `--start-range + --num-elts` runs past the last receipt id.
    pub fn poll_options(&self) -> Result<PollOptions> {
        let opts = PollOptions {
            start: self.start_range,
            count: self.num_elts,
            wait: self.wait,
            save: self.save_data,
            out_dir: self.out_dir.clone(),
        };
        if opts.checked_end().is_none() {
            bail!(
                "--start-range {} with --num-elts {} runs past the largest receipt id ({})",
                opts.start,
                opts.count,
                u32::MAX
            );
        }
        Ok(opts)
    }

    pub fn mode(&self) -> Result<Mode> {
        Ok(if let Some(files) = &self.compare_data {
            Mode::Compare(files.clone())
        } else if let Some(file) = &self.load_data {
            Mode::Load(file.clone(), self.poll_options()?)
        } else {
            Mode::Poll(self.poll_options()?)
        })
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init();

    match args.mode()? {
        Mode::Compare(files) => run_compare(&files),
        Mode::Load(file, opts) => run_load(&file, &opts),
        Mode::Poll(opts) => run_poll(&opts),
    }
}

fn run_compare(files: &[PathBuf]) -> Result<()> {
    let snapshots = files
        .iter()
        .map(|f| store::load(f))
        .collect::<Result<Vec<_>, _>>()?;
    let report = compare::compare(&snapshots)?;
    print!("{report}");
    Ok(())
}

fn run_load(file: &Path, opts: &PollOptions) -> Result<()> {
    let snap = store::load(file)?;
    let saved = stats::report(&opts.out_dir, snap.start, snap.end, opts.save, &snap.statuses, io::stdout().lock())?;
    if let Some(path) = saved {
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}

fn run_poll(opts: &PollOptions) -> Result<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel()).wrap_err("installing Ctrl-C handler")?;

    let mut source = CaseStatusClient::new().wrap_err("building HTTP client")?;
    let mut session = PollSession::new(opts.start, opts.end());
    let mut progress = TermProgress::new();

    let outcome = poll::poll(&mut session, &mut source, opts.wait_duration(), &cancel, &mut progress);

    let end = session.effective_end();
    if outcome == PollOutcome::Interrupted {
        eprintln!(
            "Interrupted: reporting {} of {} cases ({}..{}).",
            end - session.start,
            session.end - session.start,
            session.start,
            end
        );
    }

    let saved = stats::report(&opts.out_dir, session.start, end, opts.save, session.completed(), io::stdout().lock())?;
    if let Some(path) = saved {
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress bar on stderr, last receipt fetched as the message.
pub struct TermProgress {
    bar: ProgressBar,
}

impl TermProgress {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Wrap an existing bar, e.g. `ProgressBar::hidden()` when nothing should be drawn.
    pub fn with_bar(bar: ProgressBar) -> Self {
        match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => logd!("progress template rejected: {e}"),
        }
        Self { bar }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl Default for TermProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for TermProgress {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn item_done(&mut self, _id: u32, receipt: &str) {
        self.bar.inc(1);
        self.bar.set_message(receipt.to_string());
    }

    /// A full run clears the bar; a cut-short one leaves it where it stopped.
    fn finish(&mut self) {
        let done = self.bar.position();
        if self.bar.length().is_some_and(|len| done < len) {
            self.bar.abandon();
        } else {
            self.bar.finish_and_clear();
        }
    }
}
