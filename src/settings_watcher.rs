//! Hot reload for the view settings file.
//!
//! Watches the directory holding the settings file rather than the file
//! itself: [`crate::settings::ViewSettings::save_to`] replaces the file by
//! rename, which would silently end a watch placed on the old inode.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::settings::parent_dir;
pub use crate::settings::default_settings_path;

/// Change to the settings file seen since the last poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    events: Arc<Mutex<VecDeque<SettingsEvent>>>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> notify::Result<Self> {
        let events = Arc::new(Mutex::new(VecDeque::new()));
        let file_name = path.file_name().map(OsString::from);
        let queue = Arc::clone(&events);

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let event = match result {
                Ok(event) => {
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(OsString::from) == file_name);
                    if !ours {
                        return;
                    }
                    match event.kind {
                        EventKind::Create(_) => SettingsEvent::Created,
                        EventKind::Modify(_) => SettingsEvent::Modified,
                        EventKind::Remove(_) => SettingsEvent::Deleted,
                        _ => return,
                    }
                }
                Err(e) => SettingsEvent::Error(e.to_string()),
            };
            queue.lock().push_back(event);
        })?;

        watcher.watch(parent_dir(&path), RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching view settings");

        Ok(Self {
            path,
            events,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most significant pending event, collapsing bursts into one.
    ///
    /// An editor save typically produces several create/modify events; the
    /// host only needs to reload once.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut queue = self.events.lock();
        let mut latest = None;
        while let Some(event) = queue.pop_front() {
            if let SettingsEvent::Error(ref message) = event {
                warn!(error = %message, "Settings watcher error");
                return Some(event);
            }
            latest = Some(event);
        }
        latest
    }
}
