use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Bursts of filesystem events closer together than this collapse into one
/// reload notification.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the config file and sends a notification whenever it is written,
/// created or replaced.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by renaming a temp file over the original still trigger a
/// reload, and the file may be created after start-up.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_, mut rx) = agro_config::ConfigWatcher::spawn(agro_config::default_path());
/// while rx.recv().await.is_some() {
///     println!("config changed — reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Cannot create config directory '{}': {e}", dir.display());
    }

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) if touches(&e, &path) => {
                // Swallow the rest of the burst (write + chmod + rename ...).
                while let Ok(Some(_)) = tokio::time::timeout(DEBOUNCE, sync_rx.recv()).await {}
                debug!(kind = ?e.kind, "config file changed");
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// Whether `event` is a content change to `path`.
fn touches(event: &notify::Event, path: &Path) -> bool {
    use notify::EventKind::{Create, Modify};
    matches!(event.kind, Modify(_) | Create(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}
