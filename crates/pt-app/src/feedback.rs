//! User-visible notices and the statistics summary.

pub const SIMULATION_DONE: &str = "Simulation completed";
pub const SIMULATION_FAILED: &str = "Simulation failed";
pub const SIMULATION_ERROR: &str = "An error occurred while running the simulation";
pub const UPLOAD_DONE: &str = "Test data uploaded";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPLOAD_ERROR: &str = "An error occurred while uploading the file";
pub const NO_FILE_SELECTED: &str = "Please select a file to upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// `"<prefix>: <server message>"`, or `generic` when the server gave none.
    pub fn failure(prefix: &str, server_message: Option<&str>, generic: &str) -> Self {
        match server_message {
            Some(message) => Self::error(format!("{prefix}: {message}")),
            None => Self::error(generic),
        }
    }
}

/// Where notices and the run summary go.
pub trait Feedback {
    fn notify(&self, notice: Notice);
    fn show_summary(&self, summary: &str);
}

impl<T: Feedback + ?Sized> Feedback for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }

    fn show_summary(&self, summary: &str) {
        (**self).show_summary(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_prefers_server_text() {
        let notice = Notice::failure(SIMULATION_FAILED, Some("timeout"), SIMULATION_ERROR);
        assert_eq!(notice, Notice::error("Simulation failed: timeout"));

        let notice = Notice::failure(SIMULATION_FAILED, None, SIMULATION_ERROR);
        assert_eq!(notice, Notice::error(SIMULATION_ERROR));
    }
}
