//! Upload Guard
//! Rejects any selection on the upload control that is not a `.txt` file.

use super::Alerter;
use crate::config::{normalize_extension, UploadConfig};
use crate::page::{FileInput, Page};

/// Where the guard is within a single selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Checking,
    Accepted,
    Rejected,
}

/// What a selection event ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Change fired with no file (picker cancelled).
    NoFile,
    Accepted(String),
    Rejected(String),
}

/// Case-insensitive suffix check on a file name.
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .to_lowercase()
        .ends_with(&extension.to_lowercase())
}

/// Listener bound to one file-input control.
#[derive(Debug, Clone)]
pub struct UploadGuard {
    input_name: String,
    allowed_extension: String,
    rejection_message: String,
    state: GuardState,
}

impl UploadGuard {
    /// Bind to the configured control. `None` if the page has no such control.
    pub fn install(page: &Page, config: &UploadConfig) -> Option<Self> {
        let Some(input) = page.file_input(&config.input_name) else {
            log::debug!("No '{}' file input on page; upload guard not installed", config.input_name);
            return None;
        };

        Some(Self {
            input_name: input.name.clone(),
            allowed_extension: normalize_extension(&config.allowed_extension),
            rejection_message: config.rejection_message.clone(),
            state: GuardState::Idle,
        })
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Handle a change event on the control.
    ///
    /// Rejection alerts synchronously and clears the control.
    pub fn on_change(&mut self, input: &mut FileInput, alerter: &mut dyn Alerter) -> GuardOutcome {
        let Some(file) = input.first_file() else {
            self.state = GuardState::Idle;
            return GuardOutcome::NoFile;
        };

        self.state = GuardState::Checking;
        let name = file.name.clone();

        if has_extension(&name, &self.allowed_extension) {
            self.state = GuardState::Accepted;
            match &file.path {
                Some(path) => log::info!("Accepted upload '{}' from {}", name, path.display()),
                None => log::info!("Accepted upload '{}'", name),
            }
            return GuardOutcome::Accepted(name);
        }

        self.state = GuardState::Rejected;
        log::warn!("Rejected upload '{}': not a {} file", name, self.allowed_extension);
        alerter.alert(&self.rejection_message);
        input.clear();
        self.state = GuardState::Idle;
        GuardOutcome::Rejected(name)
    }

    /// Handle a change event on the control as it sits on the page.
    pub fn on_page_change(&mut self, page: &mut Page, alerter: &mut dyn Alerter) -> GuardOutcome {
        match page.file_input_mut(&self.input_name) {
            Some(input) => self.on_change(input, alerter),
            None => GuardOutcome::NoFile,
        }
    }
}
