//! Upload module - file selection guard and the alert it raises

mod guard;

pub use guard::{GuardOutcome, UploadGuard};

/// Blocking, user-facing message.
pub trait Alerter {
    fn alert(&mut self, message: &str);
}

/// Native modal dialog; returns once the user dismisses it.
pub struct DialogAlerter {
    pub title: String,
}

impl Default for DialogAlerter {
    fn default() -> Self {
        Self {
            title: "Vulnboard".to_string(),
        }
    }
}

impl Alerter for DialogAlerter {
    fn alert(&mut self, message: &str) {
        // Ok-only dialog: the result carries no choice.
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(self.title.as_str())
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
