//! Dialog refresh pipeline
//!
//! Ties the mods folder, the source tree under it and the compiled cache
//! together: source file → parser → transcoder → serializer → cache slot.
//!
//! Layout under the mods folder:
//!
//! ```text
//! DialogLoader/
//!   config.toml          (optional)
//!   dialog/
//!     0001.dialog
//!     <subdir>/0A2F.dialog
//! ```

use std::collections::{BTreeSet, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cache::{BlobSlot, DialogCache, SLOT_SIZE};
use crate::config::{DIALOG_DIR, LOADER_DIR, LoaderConfig};
use crate::error::{Error, Result};
use crate::formats::dialog::{DIALOG_EXTENSION, read_dialog, serialize_dialog_with_warnings};
use crate::utils::TextId;

/// What happened to a single id during a refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Compiled and cached from `path`
    Loaded { path: PathBuf },
    /// No file with the canonical name exists in the tree
    NotFound,
    /// The file exists but could not be compiled; the id is not cached
    Failed { path: PathBuf, error: Error },
}

/// A dialog file that failed to compile
#[derive(Debug)]
pub struct RefreshFailure {
    pub id: TextId,
    pub path: PathBuf,
    pub error: Error,
}

/// Summary of a full refresh
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Ids now present in the cache
    pub loaded: Vec<TextId>,
    /// `.dialog` files whose stem is not a hex id
    pub skipped: Vec<PathBuf>,
    /// Ids whose canonical file name could not be found (e.g. lowercase stems)
    pub unresolved: Vec<TextId>,
    /// Files that failed to read or parse
    pub failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unresolved.is_empty() && self.failures.is_empty()
    }
}

/// Mods folder, config and compiled cache for one host session
#[derive(Debug, Default)]
pub struct DialogLoader {
    mod_root: PathBuf,
    config: LoaderConfig,
    dialogs: DialogCache,
}

impl DialogLoader {
    /// A loader with no mods folder set yet (paths resolve against the
    /// current directory)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mod_root<P: Into<PathBuf>>(mod_root: P) -> Self {
        let mut loader = Self::new();
        loader.set_mod_root(mod_root);
        loader
    }

    /// Point the loader at a mods folder and load its config
    pub fn set_mod_root<P: Into<PathBuf>>(&mut self, mod_root: P) {
        self.mod_root = mod_root.into();
        self.config = LoaderConfig::load_or_default(&self.mod_root);
        tracing::info!("Mods folder path set to {}", self.mod_root.display());
    }

    pub fn mod_root(&self) -> &Path {
        &self.mod_root
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LoaderConfig) {
        self.config = config;
    }

    pub fn cache(&self) -> &DialogCache {
        &self.dialogs
    }

    /// `<mods>/DialogLoader`
    pub fn loader_dir(&self) -> PathBuf {
        self.mod_root.join(LOADER_DIR)
    }

    /// `<mods>/DialogLoader/dialog`
    pub fn dialog_dir(&self) -> PathBuf {
        self.loader_dir().join(DIALOG_DIR)
    }

    /// Rebuild the whole cache from the dialog tree.
    ///
    /// Creates the loader folders if they are missing. Never fails: problems
    /// are logged and collected in the report.
    pub fn refresh_all(&mut self) -> RefreshReport {
        self.dialogs.clear();
        let mut report = RefreshReport::default();

        if let Err(e) = self.ensure_dirs() {
            tracing::warn!(
                "Failed to create dialog folder {}: {}",
                self.dialog_dir().display(),
                e
            );
            return report;
        }

        // One walk: file name -> first path in traversal order
        let mut ids = BTreeSet::new();
        let mut by_name: HashMap<OsString, PathBuf> = HashMap::new();
        for path in dialog_files(&self.dialog_dir()) {
            match TextId::from_path(&path) {
                Some(id) => {
                    ids.insert(id);
                    if let Some(name) = path.file_name() {
                        by_name.entry(name.to_os_string()).or_insert_with(|| path.clone());
                    }
                }
                None => {
                    tracing::debug!("Skipping {}: stem is not a hex text id", path.display());
                    report.skipped.push(path);
                }
            }
        }

        for id in ids {
            let path = by_name.get(OsStr::new(&id.file_name())).cloned();
            match self.load_resolved(id, path) {
                RefreshOutcome::Loaded { .. } => report.loaded.push(id),
                RefreshOutcome::NotFound => report.unresolved.push(id),
                RefreshOutcome::Failed { path, error } => {
                    report.failures.push(RefreshFailure { id, path, error });
                }
            }
        }

        tracing::info!(
            "Loaded {} dialogs ({} failed, {} skipped)",
            report.loaded.len(),
            report.failures.len(),
            report.skipped.len() + report.unresolved.len()
        );

        report
    }

    /// Recompile a single id from its canonical file.
    ///
    /// The old slot is always dropped first, so a failed compile leaves the
    /// id absent rather than stale.
    pub fn refresh_dialog(&mut self, id: TextId) -> RefreshOutcome {
        let path = find_dialog_file(&self.dialog_dir(), id);
        self.load_resolved(id, path)
    }

    /// Evict `id`, then compile it from an already located file
    fn load_resolved(&mut self, id: TextId, path: Option<PathBuf>) -> RefreshOutcome {
        self.dialogs.remove(id);

        let Some(path) = path else {
            return RefreshOutcome::NotFound;
        };

        match self.compile(&path) {
            Ok(slot) => {
                self.dialogs.insert(id, slot);
                tracing::debug!("Compiled {} as text id {}", path.display(), id);
                RefreshOutcome::Loaded { path }
            }
            Err(error) => {
                tracing::warn!("Error loading {}: {}", path.display(), error);
                RefreshOutcome::Failed { path, error }
            }
        }
    }

    /// Copy the cached slot for `id` into `dest`; `false` on a miss
    pub fn get_dialog(&self, id: TextId, dest: &mut [u8; SLOT_SIZE]) -> bool {
        self.dialogs.copy_into(id, dest)
    }

    fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.loader_dir())?;
        std::fs::create_dir_all(self.dialog_dir())?;
        Ok(())
    }

    fn compile(&self, path: &Path) -> Result<BlobSlot> {
        let dialog = read_dialog(path)?;
        let (blob, warnings) = serialize_dialog_with_warnings(&dialog);

        if self.config.warn_on_truncation {
            for warning in &warnings {
                tracing::warn!("{}: {}", path.display(), warning);
            }
            if blob.len() > SLOT_SIZE {
                tracing::warn!(
                    "{}: compiled dialog is {} bytes, truncated to {}",
                    path.display(),
                    blob.len(),
                    SLOT_SIZE
                );
            }
        }

        Ok(BlobSlot::from_blob(&blob))
    }
}

/// Every `.dialog` regular file under `dialog_dir`, in traversal order
pub fn dialog_files(dialog_dir: &Path) -> Vec<PathBuf> {
    walk(dialog_dir)
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == DIALOG_EXTENSION)
        })
        .collect()
}

/// First regular file named exactly `id.file_name()` under `dialog_dir`
pub fn find_dialog_file(dialog_dir: &Path, id: TextId) -> Option<PathBuf> {
    if !dialog_dir.is_dir() {
        return None;
    }
    let file_name = id.file_name();
    walk(dialog_dir).find(|path| path.file_name().is_some_and(|name| name == file_name.as_str()))
}

/// Regular files under `dir`, depth-first in file-name order.
///
/// Unreadable entries are logged and skipped.
fn walk(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("{}", Error::from(e));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
}
