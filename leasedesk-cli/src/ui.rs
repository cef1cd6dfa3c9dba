//! Progress feedback for console commands
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `LEASEDESK_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::future::Future;
use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Call once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("LEASEDESK_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Show a spinner while `f` runs, clearing it afterwards.
///
/// Errors are left for the caller to report inline.
pub async fn while_loading<T, E>(
    msg: impl Into<String>,
    f: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let pb = spinner(msg);
    let result = f.await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result
}
