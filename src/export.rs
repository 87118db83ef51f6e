use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::assemble::Assembled;
use crate::error::Result;
use crate::path::PathSegment;

pub const COORDS_FILE: &str = "coords.txt";
pub const METRICS_FILE: &str = "metrics.txt";
pub const SEGMENTS_FILE: &str = "segments.json";

/// Lines written between progress callbacks.
const REPORT_EVERY: usize = 4096;

/// Feedback hook for the export step. Carries no data back to the writer.
pub trait Progress {
    fn start(&mut self, _total: u64) {}
    fn advance(&mut self, n: u64);
    fn finish(&mut self) {}
}

pub struct Silent;

impl Progress for Silent {
    fn advance(&mut self, _n: u64) {}
}

/// Terminal spinner; ticks on its own thread until `finish`.
#[derive(Default)]
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Progress for Spinner {
    fn start(&mut self, total: u64) {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} Writing to file... {pos}/{len} lines")
        {
            bar.set_style(style.tick_chars("|/-\\ "));
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    fn advance(&mut self, n: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(n);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message("Done!");
        }
    }
}

/// Folder name for a run started now, e.g. `2024-05-01_13-45-10`.
pub fn timestamp_name() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Create `parent/<name>`. The parent may already exist; the run folder
/// must not.
pub fn create_run_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(parent)?;
    let dir = parent.join(name);
    fs::create_dir(&dir)?;
    Ok(dir)
}

pub fn write_coords<W: Write>(
    out: &mut W,
    coords: &[[f64; 2]],
    progress: &mut dyn Progress,
) -> Result<()> {
    for (k, [x, y]) in coords.iter().enumerate() {
        writeln!(out, "{x} {y}")?;
        if (k + 1) % REPORT_EVERY == 0 {
            progress.advance(REPORT_EVERY as u64);
        }
    }
    progress.advance((coords.len() % REPORT_EVERY) as u64);
    Ok(())
}

pub fn write_metrics<W: Write>(
    out: &mut W,
    metrics: &[[f64; 7]],
    progress: &mut dyn Progress,
) -> Result<()> {
    for (k, m) in metrics.iter().enumerate() {
        writeln!(out, "{} {} {} {} {} {} {}", m[0], m[1], m[2], m[3], m[4], m[5], m[6])?;
        if (k + 1) % REPORT_EVERY == 0 {
            progress.advance(REPORT_EVERY as u64);
        }
    }
    progress.advance((metrics.len() % REPORT_EVERY) as u64);
    Ok(())
}

pub fn write_segments(path: &Path, segments: &[PathSegment]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, segments)?;
    out.flush()?;
    Ok(())
}

fn write_tables(dir: &Path, assembled: &Assembled, progress: &mut dyn Progress) -> Result<()> {
    let mut coords = BufWriter::new(File::create(dir.join(COORDS_FILE))?);
    write_coords(&mut coords, &assembled.coords, progress)?;
    coords.flush()?;

    let mut metrics = BufWriter::new(File::create(dir.join(METRICS_FILE))?);
    write_metrics(&mut metrics, &assembled.metrics, progress)?;
    metrics.flush()?;
    Ok(())
}

/// Write `coords.txt`, `metrics.txt` and `segments.json` into `dir`.
pub fn write_run(
    dir: &Path,
    assembled: &Assembled,
    segments: &[PathSegment],
    progress: &mut dyn Progress,
) -> Result<()> {
    write_segments(&dir.join(SEGMENTS_FILE), segments)?;

    progress.start(2 * assembled.len() as u64);
    let result = write_tables(dir, assembled, progress);
    progress.finish();

    debug!(dir = %dir.display(), points = assembled.len(), "export finished");
    result
}
