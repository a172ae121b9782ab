//! User-facing feedback seams: messages and the vault folder prompt.
//!
//! Both are traits so the sync flows can be exercised with mocks.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};

#[cfg(test)]
use mockall::automock;

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Shows messages to the user.
#[cfg_attr(test, automock)]
pub trait Notifier {
    /// A confirmation the user should see.
    fn info(&self, message: &str);

    /// Something was not done, but nothing failed either.
    fn warning(&self, message: &str);

    /// A short-lived status line that goes away on its own.
    fn status(&self, message: &str, duration: Duration);
}

/// Asks the user for a directory.
#[cfg_attr(test, automock)]
pub trait DirectoryPicker {
    /// `None` when the user cancels.
    fn pick_directory(&self, title: &str) -> Option<PathBuf>;
}

/// Writes messages to the terminal.
///
/// On a terminal, status lines overwrite each other and are cleared once their
/// duration passes unless a newer status replaced them.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    status_generation: Arc<AtomicU64>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }

    fn status(&self, message: &str, duration: Duration) {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            let _ = writeln!(stdout, "{}", message);
            return;
        }

        let generation = self.status_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = write!(stdout, "{}{}", CLEAR_LINE, message);
        let _ = stdout.flush();

        schedule_clear(
            Arc::clone(&self.status_generation),
            generation,
            duration,
            || {
                let mut stdout = std::io::stdout();
                let _ = write!(stdout, "{}", CLEAR_LINE);
                let _ = stdout.flush();
            },
        );
    }
}

/// Run `clear` after `duration` unless a newer status bumped the generation.
///
/// Uses a tokio task when called inside a runtime, a plain thread otherwise.
fn schedule_clear<F>(latest: Arc<AtomicU64>, generation: u64, duration: Duration, clear: F)
where
    F: FnOnce() + Send + 'static,
{
    let clear_if_current = move || {
        if latest.load(Ordering::SeqCst) == generation {
            clear();
        }
    };

    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                clear_if_current();
            });
        }
        Err(_) => {
            std::thread::spawn(move || {
                std::thread::sleep(duration);
                clear_if_current();
            });
        }
    }
}

/// Run blocking terminal I/O without stalling the async runtime.
///
/// On a multi-threaded runtime the worker hands its other tasks off while `f`
/// blocks. Elsewhere `f` just runs.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Prompts for a directory on the terminal.
///
/// Returns `None` on empty input, end of input, or when stdin is not a
/// terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPicker;

impl DirectoryPicker for StdinPicker {
    fn pick_directory(&self, title: &str) -> Option<PathBuf> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return None;
        }

        run_blocking(|| {
            eprint!("{}: ", title);
            let _ = std::io::stderr().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => parse_picked_path(&line),
            }
        })
    }
}

/// Answers the prompt with a path given up front.
#[derive(Debug, Default, Clone)]
pub struct PresetPicker {
    path: Option<PathBuf>,
}

impl PresetPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A picker that always cancels.
    pub fn none() -> Self {
        Self { path: None }
    }
}

impl DirectoryPicker for PresetPicker {
    fn pick_directory(&self, _title: &str) -> Option<PathBuf> {
        self.path.clone()
    }
}

/// Trim a typed path and expand a leading `~`.
fn parse_picked_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if (trimmed == "~" || trimmed.starts_with("~/"))
        && let Some(home) = std::env::var_os("HOME")
    {
        let rest = trimmed.trim_start_matches('~').trim_start_matches('/');
        return Some(PathBuf::from(home).join(rest));
    }

    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_preset_picker_returns_path() {
        let picker = PresetPicker::new("/vault");
        assert_eq!(picker.pick_directory("title"), Some(PathBuf::from("/vault")));
    }

    #[test]
    fn test_preset_picker_none_cancels() {
        assert_eq!(PresetPicker::none().pick_directory("title"), None);
    }

    #[test]
    fn test_parse_picked_path_trims() {
        assert_eq!(
            parse_picked_path("  /home/me/vault \n"),
            Some(PathBuf::from("/home/me/vault"))
        );
    }

    #[test]
    fn test_parse_picked_path_blank_is_cancel() {
        assert_eq!(parse_picked_path("\n"), None);
        assert_eq!(parse_picked_path("   "), None);
    }

    #[test]
    fn test_parse_picked_path_keeps_relative() {
        assert_eq!(parse_picked_path("notes\n"), Some(PathBuf::from("notes")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_clears_after_duration() {
        let latest = Arc::new(AtomicU64::new(1));
        let cleared = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cleared);

        schedule_clear(Arc::clone(&latest), 1, Duration::from_secs(3), move || {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!cleared.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(cleared.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_status_is_not_cleared() {
        let latest = Arc::new(AtomicU64::new(1));
        let cleared = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cleared);

        schedule_clear(Arc::clone(&latest), 1, Duration::from_secs(3), move || {
            flag.store(true, Ordering::SeqCst);
        });
        latest.store(2, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!cleared.load(Ordering::SeqCst));
    }

    #[test]
    fn test_run_blocking_without_runtime() {
        assert_eq!(run_blocking(|| 7), 7);
    }

    #[tokio::test]
    async fn test_run_blocking_on_current_thread_runtime() {
        assert_eq!(run_blocking(|| 7), 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_blocking_on_multi_thread_runtime() {
        let other = tokio::spawn(async { 1 });
        let value = run_blocking(|| {
            std::thread::sleep(Duration::from_millis(20));
            7
        });
        assert_eq!(value, 7);
        assert_eq!(other.await.unwrap(), 1);
    }
}
