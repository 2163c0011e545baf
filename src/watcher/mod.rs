//! Re-parse a note when it changes on disk.
//!
//! [`NoteWatcher`] keeps the note's parsed tree. Filesystem events are
//! debounced, then the note is re-read and re-parsed; a reload is reported
//! only when the new tree differs from the last one. Saves that leave the
//! document unchanged (extra blank lines, trailing spaces) are swallowed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::convert::read_source;
use crate::document::{Node, parse};
use crate::error::InputError;

/// Where a note lives. Editors often replace the file on save, so the
/// parent directory is watched and events are matched back to the note.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NoteLocation {
    dir: PathBuf,
    file: PathBuf,
    name: Option<OsString>,
}

impl NoteLocation {
    fn resolve(path: &Path) -> Self {
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let name = file.file_name().map(OsString::from);
        Self { dir, file, name }
    }

    /// Whether `event` may have changed the note.
    fn affected_by(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            *path == self.dir
                || *path == self.file
                || path.file_name().is_some_and(|f| Some(f) == self.name.as_deref())
        })
    }
}

/// Keeps a note's node tree in sync with the file.
pub struct NoteWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    location: NoteLocation,
    debounce: Duration,
    dirty_since: Option<Instant>,
    tree: Vec<Node>,
}

impl NoteWatcher {
    /// Parse the note at `path` and start watching it.
    ///
    /// # Errors
    /// Fails if the note cannot be read or the watch cannot be registered.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> Result<Self, InputError> {
        let location = NoteLocation::resolve(path.as_ref());
        let tree = parse(&read_source(Some(location.file.as_path()))?);

        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&location.dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(
            note = %location.file.display(),
            dir = %location.dir.display(),
            blocks = tree.len(),
            "watching note"
        );

        Ok(Self {
            _watcher: watcher,
            events,
            location,
            debounce,
            dirty_since: None,
            tree,
        })
    }

    pub fn path(&self) -> &Path {
        &self.location.file
    }

    /// The most recently parsed tree.
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    /// Drain pending events and reload once they have settled.
    ///
    /// Returns `Ok(true)` when the note was re-parsed into a different tree.
    ///
    /// # Errors
    /// Fails if the note cannot be re-read; the previous tree is kept.
    pub fn poll(&mut self) -> Result<bool, InputError> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) if self.location.affected_by(&event) => {
                    self.dirty_since = Some(Instant::now());
                }
                Ok(event) => tracing::trace!(paths = ?event.paths, "ignored event"),
                Err(err) => tracing::warn!(%err, "watch error"),
            }
        }

        match self.dirty_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.dirty_since = None;
                self.reload()
            }
            _ => Ok(false),
        }
    }

    /// Re-read and re-parse the note now.
    ///
    /// # Errors
    /// Fails if the note cannot be read.
    pub fn reload(&mut self) -> Result<bool, InputError> {
        let source = read_source(Some(self.location.file.as_path()))?;
        Ok(self.replace_tree(parse(&source)))
    }

    fn replace_tree(&mut self, tree: Vec<Node>) -> bool {
        if tree == self.tree {
            tracing::debug!("note saved without changes");
            return false;
        }
        tracing::debug!(blocks = tree.len(), "note changed");
        self.tree = tree;
        true
    }
}
