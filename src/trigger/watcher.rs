//! SaveWatcher - turns filesystem writes into save notifications.
//!
//! notify's sync callback forwards events into a tokio channel with
//! `blocking_send`. Writes are debounced per path so one editor save, which
//! often shows up as several create/modify events, yields one notification.
//! Settled paths go to [`SyncService::on_file_saved`] in the order they
//! settled.
//!
//! Paths matched by the root's `.gitignore` are dropped before debouncing, so
//! build output and editor scratch files never reach the service.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::feedback::{DirectoryPicker, Notifier};
use super::service::{AutoSync, SyncService};
use crate::settings::SettingsStore;

/// Configuration for the SaveWatcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Directory watched recursively.
    pub root: PathBuf,
    /// Quiet period before a path counts as saved.
    pub debounce: Duration,
    /// Poll interval for platforms without native notifications.
    pub poll_interval: Duration,
}

impl WatcherConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce: Duration::from_millis(300),
            poll_interval: Duration::from_secs(2),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Errors that can occur while setting up the watcher.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum WatcherError {
    #[error("Failed to initialize watcher: {0}")]
    #[diagnostic(code(codenote::watcher::init))]
    Init(#[source] notify::Error),

    #[error("Failed to watch {path}: {source}")]
    #[diagnostic(
        code(codenote::watcher::watch),
        help("Check that the directory exists and is readable.")
    )]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Failed to build gitignore for {path}: {source}")]
    #[diagnostic(code(codenote::watcher::gitignore))]
    Gitignore {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

/// Counts of handled save notifications.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub synced: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl WatchSummary {
    fn record(&mut self, outcome: &AutoSync) {
        match outcome {
            AutoSync::Synced(_) => self.synced += 1,
            AutoSync::Skipped(_) => self.skipped += 1,
            AutoSync::Failed => self.failed += 1,
        }
    }
}

/// Whether an event kind looks like a file being written.
pub(crate) fn is_save_event(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(_) | EventKind::Remove(_) | EventKind::Any | EventKind::Other => false,
    }
}

/// Per-path quiet-period tracking.
#[derive(Debug)]
pub(crate) struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Note an event for `path`, restarting its quiet period.
    pub(crate) fn record(&mut self, path: PathBuf, at: Instant) {
        self.pending.insert(path, at);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return paths quiet for at least the window, oldest first.
    pub(crate) fn take_settled(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut settled: Vec<(PathBuf, Instant)> = self
            .pending
            .iter()
            .filter(|(_, last)| now.saturating_duration_since(**last) >= self.window)
            .map(|(path, last)| (path.clone(), *last))
            .collect();
        settled.sort_by_key(|(_, last)| *last);

        for (path, _) in &settled {
            self.pending.remove(path);
        }
        settled.into_iter().map(|(path, _)| path).collect()
    }

    /// Remove and return everything pending, oldest first.
    pub(crate) fn drain(&mut self) -> Vec<PathBuf> {
        let mut all: Vec<(PathBuf, Instant)> = self.pending.drain().collect();
        all.sort_by_key(|(_, last)| *last);
        all.into_iter().map(|(path, _)| path).collect()
    }
}

/// Watches a directory and feeds saved files to a [`SyncService`].
pub struct SaveWatcher {
    config: WatcherConfig,
    // The notify watcher must be held to keep it alive
    _watcher: RecommendedWatcher,
    event_rx: mpsc::Receiver<Result<Event, notify::Error>>,
    gitignore: Option<Gitignore>,
}

impl SaveWatcher {
    /// Start watching `config.root`. Events queue up until [`run`](Self::run).
    pub fn new(config: WatcherConfig) -> Result<Self, WatcherError> {
        let gitignore = build_gitignore(&config.root)?;
        let (event_tx, event_rx) = mpsc::channel::<Result<Event, notify::Error>>(256);

        let notify_config = Config::default().with_poll_interval(config.poll_interval);
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                // Runs on notify's thread; the event is dropped if the loop is gone
                let _ = event_tx.blocking_send(res);
            },
            notify_config,
        )
        .map_err(WatcherError::Init)?;

        watcher
            .watch(&config.root, RecursiveMode::Recursive)
            .map_err(|source| WatcherError::Watch {
                path: config.root.clone(),
                source,
            })?;

        info!(root = %config.root.display(), "Save watcher started");

        Ok(Self {
            config,
            _watcher: watcher,
            event_rx,
            gitignore,
        })
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Process save notifications until `cancel` fires or the channel closes.
    ///
    /// Paths still waiting out their quiet period are handled before
    /// returning.
    pub async fn run<S, P, N>(
        mut self,
        service: &SyncService<S, P, N>,
        cancel: CancellationToken,
    ) -> WatchSummary
    where
        S: SettingsStore,
        P: DirectoryPicker,
        N: Notifier,
    {
        let mut summary = WatchSummary::default();
        let mut debouncer = Debouncer::new(self.config.debounce);
        let tick = (self.config.debounce / 2).max(Duration::from_millis(10));
        let mut interval = tokio::time::interval(tick);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("Save watcher shutting down");
                    break;
                }

                event = self.event_rx.recv() => match event {
                    Some(Ok(event)) => {
                        Self::collect(&mut debouncer, self.gitignore.as_ref(), event)
                    }
                    Some(Err(e)) => warn!(error = %e, "Watcher error"),
                    None => {
                        info!("Save watcher channel closed");
                        break;
                    }
                },

                _ = interval.tick() => {
                    for path in debouncer.take_settled(Instant::now()) {
                        Self::dispatch(service, &path, &mut summary).await;
                    }
                }
            }
        }

        if !debouncer.is_empty() {
            debug!("Flushing pending saves on shutdown");
            for path in debouncer.drain() {
                Self::dispatch(service, &path, &mut summary).await;
            }
        }

        summary
    }

    fn collect(debouncer: &mut Debouncer, gitignore: Option<&Gitignore>, event: Event) {
        if !is_save_event(&event.kind) {
            return;
        }

        let now = Instant::now();
        for path in event.paths {
            if path.is_dir() {
                trace!(path = %path.display(), "Skipping directory event");
                continue;
            }
            if is_ignored(gitignore, &path) {
                trace!(path = %path.display(), "Skipping gitignored path");
                continue;
            }
            debouncer.record(path, now);
        }
    }

    async fn dispatch<S, P, N>(
        service: &SyncService<S, P, N>,
        path: &Path,
        summary: &mut WatchSummary,
    ) where
        S: SettingsStore,
        P: DirectoryPicker,
        N: Notifier,
    {
        // Editors that save via a temp file leave events for paths already gone
        if !path.is_file() {
            trace!(path = %path.display(), "Skipping vanished file");
            return;
        }

        let outcome = service.on_file_saved(path).await;
        debug!(path = %path.display(), ?outcome, "Handled save");
        summary.record(&outcome);
    }
}

/// Build a matcher from `<root>/.gitignore`, or `None` when there is none.
fn build_gitignore(root: &Path) -> Result<Option<Gitignore>, WatcherError> {
    let gitignore_path = root.join(".gitignore");
    if !gitignore_path.is_file() {
        debug!(root = %root.display(), "No .gitignore found, every save is forwarded");
        return Ok(None);
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&gitignore_path) {
        warn!(error = %err, "Error parsing .gitignore, continuing with partial rules");
    }

    let gitignore = builder.build().map_err(|source| WatcherError::Gitignore {
        path: gitignore_path.clone(),
        source,
    })?;
    debug!(gitignore = %gitignore_path.display(), "Gitignore matcher built");
    Ok(Some(gitignore))
}

/// Whether `path` or one of its parent directories is gitignored.
fn is_ignored(gitignore: Option<&Gitignore>, path: &Path) -> bool {
    let Some(gitignore) = gitignore else {
        return false;
    };
    // The matcher panics on paths outside its root
    if !path.starts_with(gitignore.path()) {
        return false;
    }
    gitignore
        .matched_path_or_any_parents(path, path.is_dir())
        .is_ignore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{JsonSettingsStore, SettingsStore, SyncSettings};
    use crate::trigger::feedback::{MockNotifier, PresetPicker};
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};
    use tempfile::TempDir;

    #[test]
    fn test_save_event_kinds() {
        assert!(is_save_event(&EventKind::Create(CreateKind::File)));
        assert!(is_save_event(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(is_save_event(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_save_event(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Any
        ))));
        assert!(!is_save_event(&EventKind::Access(AccessKind::Any)));
        assert!(!is_save_event(&EventKind::Remove(RemoveKind::File)));
    }

    #[test]
    fn test_debouncer_coalesces_burst() {
        let start = Instant::now();
        let window = Duration::from_millis(100);
        let mut debouncer = Debouncer::new(window);
        let path = PathBuf::from("/work/main.rs");

        debouncer.record(path.clone(), start);
        debouncer.record(path.clone(), start + Duration::from_millis(40));
        debouncer.record(path.clone(), start + Duration::from_millis(80));

        assert!(debouncer.take_settled(start + Duration::from_millis(150)).is_empty());
        assert_eq!(
            debouncer.take_settled(start + Duration::from_millis(180)),
            vec![path]
        );
        assert!(debouncer.is_empty());
    }

    #[test]
    fn test_debouncer_orders_by_last_event() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));

        debouncer.record(PathBuf::from("/b"), start + Duration::from_millis(5));
        debouncer.record(PathBuf::from("/a"), start);

        assert_eq!(
            debouncer.take_settled(start + Duration::from_millis(100)),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_debouncer_drain_returns_unsettled() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.record(PathBuf::from("/a"), start);

        assert!(debouncer.take_settled(start).is_empty());
        assert_eq!(debouncer.drain(), vec![PathBuf::from("/a")]);
    }

    #[test]
    fn test_watch_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = SaveWatcher::new(WatcherConfig::new(temp_dir.path().join("missing")));
        assert!(matches!(result, Err(WatcherError::Watch { .. })));
    }

    #[tokio::test]
    async fn test_run_stops_when_cancelled() {
        let temp_dir = TempDir::new().unwrap();
        let watcher = SaveWatcher::new(WatcherConfig::new(temp_dir.path())).unwrap();
        let service = SyncService::new(
            JsonSettingsStore::new(temp_dir.path().join("settings.json")),
            PresetPicker::none(),
            MockNotifier::new(),
        );

        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary = watcher.run(&service, cancel).await;
        assert_eq!(summary, WatchSummary::default());
    }

    #[test]
    fn test_gitignore_matches_nested_output() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join(".gitignore"), "target/\n*.swp\n").unwrap();
        std::fs::create_dir_all(root.path().join("target/debug")).unwrap();

        let gitignore = build_gitignore(root.path()).unwrap();

        assert!(gitignore.is_some());
        let gitignore = gitignore.as_ref();
        assert!(is_ignored(gitignore, &root.path().join("target/debug/app.d")));
        assert!(is_ignored(gitignore, &root.path().join("src/.main.rs.swp")));
        assert!(!is_ignored(gitignore, &root.path().join("src/main.rs")));
        assert!(!is_ignored(gitignore, Path::new("/elsewhere/target/app.d")));
    }

    #[test]
    fn test_no_gitignore_ignores_nothing() {
        let root = TempDir::new().unwrap();
        let gitignore = build_gitignore(root.path()).unwrap();

        assert!(gitignore.is_none());
        assert!(!is_ignored(gitignore.as_ref(), &root.path().join("target/app.d")));
    }

    struct Fixture {
        root: TempDir,
        vault: TempDir,
        _config: TempDir,
        store: JsonSettingsStore,
    }

    fn auto_sync_fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        let vault = TempDir::new().unwrap();
        let config = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(config.path().join("settings.json"));
        store
            .save(&SyncSettings {
                vault_root: Some(vault.path().to_path_buf()),
                auto_sync: true,
                ..Default::default()
            })
            .unwrap();
        Fixture {
            root,
            vault,
            _config: config,
            store,
        }
    }

    async fn wait_for(path: &Path) {
        for _ in 0..100 {
            if path.exists() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("{} was never written", path.display());
    }

    #[tokio::test]
    async fn test_run_coalesces_repeated_writes() {
        let fixture = auto_sync_fixture();
        let root = fixture.root.path().canonicalize().unwrap();
        let watcher =
            SaveWatcher::new(WatcherConfig::new(&root).with_debounce(Duration::from_millis(200)))
                .unwrap();

        let mut notifier = MockNotifier::new();
        notifier.expect_status().times(1).return_const(());
        let service = SyncService::new(fixture.store.clone(), PresetPicker::none(), notifier);

        let note = fixture.vault.path().join("Code").join("main.md");
        let cancel = CancellationToken::new();

        let (summary, ()) = tokio::join!(watcher.run(&service, cancel.clone()), async {
            let source = root.join("main.rs");
            std::fs::write(&source, "fn main() {}").unwrap();
            std::fs::write(&source, "fn main() { println!(); }").unwrap();
            wait_for(&note).await;
            tokio::time::sleep(Duration::from_millis(500)).await;
            cancel.cancel();
        });

        assert_eq!(summary.synced, 1);
        let written = std::fs::read_to_string(&note).unwrap();
        assert!(written.contains("fn main() { println!(); }"));
    }

    #[tokio::test]
    async fn test_run_skips_gitignored_writes() {
        let fixture = auto_sync_fixture();
        let root = fixture.root.path().canonicalize().unwrap();
        std::fs::write(root.join(".gitignore"), "target/\n").unwrap();
        std::fs::create_dir_all(root.join("target/debug")).unwrap();
        let watcher =
            SaveWatcher::new(WatcherConfig::new(&root).with_debounce(Duration::from_millis(100)))
                .unwrap();

        let mut notifier = MockNotifier::new();
        notifier.expect_status().times(1).return_const(());
        let service = SyncService::new(fixture.store.clone(), PresetPicker::none(), notifier);

        let code = fixture.vault.path().join("Code");
        let cancel = CancellationToken::new();

        let (summary, ()) = tokio::join!(watcher.run(&service, cancel.clone()), async {
            std::fs::write(root.join("target/debug/app.d"), "deps").unwrap();
            std::fs::write(root.join("lib.rs"), "pub fn f() {}").unwrap();
            wait_for(&code.join("lib.md")).await;
            tokio::time::sleep(Duration::from_millis(300)).await;
            cancel.cancel();
        });

        assert_eq!(summary.synced, 1);
        assert!(!code.join("app.md").exists());
    }
}
