//! File-backed rendering surface and console feedback.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use pt_app::{Feedback, Notice, NoticeLevel, RenderSurface};
use pt_core::{ChartDescription, ViewKind};

/// Writes every drawn chart to `<dir>/<view>.json`, replacing the previous one.
pub struct FileSurface {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn path_for(&self, view: ViewKind) -> PathBuf {
        self.dir.join(format!("{view}.json"))
    }

    /// Files written so far, in draw order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&self, path: &Path, chart: &ChartDescription) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, chart)?;
        Ok(())
    }
}

impl RenderSurface for FileSurface {
    fn draw(&mut self, view: ViewKind, chart: &ChartDescription) {
        let path = self.path_for(view);
        match self.write(&path, chart) {
            Ok(()) => {
                debug!(%view, path = %path.display(), "chart written");
                self.written.push(path);
            }
            Err(err) => error!(%view, path = %path.display(), error = %err, "failed to write chart"),
        }
    }

    fn relayout(&mut self, view: ViewKind) {
        debug!(%view, "view visible");
    }
}

/// Prints notices and summaries to stdout.
#[derive(Debug, Default)]
pub struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => println!("✓ {}", notice.text),
            NoticeLevel::Error => println!("✗ {}", notice.text),
        }
    }

    fn show_summary(&self, summary: &str) {
        for line in summary.lines() {
            println!("  {line}");
        }
    }
}
