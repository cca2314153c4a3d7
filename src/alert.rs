//! User-facing alerts
//!
//! Failed calls are reported to the user as a blocking alert, never
//! propagated. Where the alert goes depends on the front end.

/// Sink for user-facing alert messages
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAlerter;

impl Alerter for TerminalAlerter {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
