use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::BaseDirs;
use tracing::{debug, warn};

use crate::error::{BridgeError, Result};
use crate::models::FileMetadata;

/// The only format `save` writes, so the only one a selection may bind.
const SPREADSHEET_EXTENSION: &str = "xlsx";
/// Hex characters of the path digest kept as the opaque file id.
const ID_LEN: usize = 16;

/// Outcome of checking read-write access on a bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// The file is marked read-only; the user may choose to lift that.
    Prompt,
    Denied,
}

/// Live reference to the spreadsheet the session reads from and writes to.
#[derive(Debug, Clone)]
pub struct FileBinding {
    path: PathBuf,
    metadata: FileMetadata,
}

impl FileBinding {
    /// Resolve `path` and capture its identity.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let requested = path.as_ref();
        let path = fs::canonicalize(requested).map_err(|source| BridgeError::Selection {
            path: requested.to_path_buf(),
            source,
        })?;
        let metadata = describe(&path)?;
        debug!(path = %path.display(), id = %metadata.id, "bound spreadsheet");
        Ok(Self { path, metadata })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// Re-read name and modification time after the file changed on disk.
    pub fn refresh(&mut self) -> Result<&FileMetadata> {
        self.metadata = describe(&self.path)?;
        Ok(&self.metadata)
    }

    pub fn matches(&self, stored: &FileMetadata) -> bool {
        self.metadata.name == stored.name && self.metadata.id == stored.id
    }

    /// Only a refusal from the OS counts as `Denied`. Any other failure (the
    /// file vanished, a directory took its place) is left for the write to
    /// report with its own detail.
    pub fn query_access(&self) -> Access {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.permissions().readonly() => return Access::Prompt,
            Ok(_) => {}
            Err(err) => return self.access_after(err),
        }

        match OpenOptions::new().write(true).open(&self.path) {
            Ok(_) => Access::Granted,
            Err(err) => self.access_after(err),
        }
    }

    fn access_after(&self, err: io::Error) -> Access {
        if err.kind() == io::ErrorKind::PermissionDenied {
            warn!(path = %self.path.display(), error = %err, "write access refused");
            Access::Denied
        } else {
            debug!(path = %self.path.display(), error = %err, "access check inconclusive");
            Access::Granted
        }
    }

    /// Lift the read-only flag the user agreed to drop, then check again.
    pub fn request_access(&self) -> Access {
        if let Err(err) = make_writable(&self.path) {
            warn!(path = %self.path.display(), error = %err, "could not grant write access");
            return Access::Denied;
        }
        self.query_access()
    }
}

#[cfg(unix)]
fn make_writable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o200);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_writable(path: &Path) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

fn describe(path: &Path) -> Result<FileMetadata> {
    let meta = fs::metadata(path).map_err(|source| BridgeError::Selection {
        path: path.to_path_buf(),
        source,
    })?;
    let last_modified = meta
        .modified()
        .map(|time| DateTime::<Utc>::from(time).timestamp_millis())
        .unwrap_or_default();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileMetadata {
        name,
        id: file_id(path),
        last_modified,
    })
}

/// Digest of the canonical path. Saves replace the file through a rename, so
/// inode-based identity would not survive them.
fn file_id(path: &Path) -> String {
    let digest = blake3::hash(path.to_string_lossy().as_bytes());
    digest.to_hex()[..ID_LEN].to_string()
}

/// Turn what the user typed into the files it names. An `.xlsx` file yields
/// itself, a directory yields the `.xlsx` files directly inside it. Other
/// formats are refused because saving would overwrite them with xlsx bytes.
pub fn candidates_from_selection(input: &str) -> Result<Vec<PathBuf>> {
    let path = expand_home(input.trim());
    let meta = fs::metadata(&path).map_err(|source| BridgeError::Selection {
        path: path.clone(),
        source,
    })?;

    if !meta.is_dir() {
        return if has_spreadsheet_extension(&path) {
            Ok(vec![path])
        } else {
            Err(BridgeError::NoSpreadsheet { path })
        };
    }

    let entries = fs::read_dir(&path).map_err(|source| BridgeError::Selection {
        path: path.clone(),
        source,
    })?;
    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|candidate| candidate.is_file() && has_spreadsheet_extension(candidate))
        .collect();
    found.sort();

    if found.is_empty() {
        Err(BridgeError::NoSpreadsheet { path })
    } else {
        Ok(found)
    }
}

fn has_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(SPREADSHEET_EXTENSION))
        .unwrap_or(false)
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(input)
}

/// Find the remembered file among a fresh selection. Only an exact name and
/// id match counts.
pub fn rebind(stored: &FileMetadata, candidates: &[PathBuf]) -> Result<FileBinding> {
    candidates
        .iter()
        .filter_map(|candidate| FileBinding::open(candidate).ok())
        .find(|binding| binding.matches(stored))
        .ok_or_else(|| BridgeError::NotFound {
            name: stored.name.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"placeholder").unwrap();
        path
    }

    #[test]
    fn open_captures_name_and_stable_id() {
        let dir = tempdir().unwrap();
        let path = touch(dir.path(), "roster.xlsx");

        let first = FileBinding::open(&path).unwrap();
        let second = FileBinding::open(&path).unwrap();
        assert_eq!(first.name(), "roster.xlsx");
        assert_eq!(first.metadata().id, second.metadata().id);
        assert_eq!(first.metadata().id.len(), ID_LEN);
        assert!(first.metadata().last_modified > 0);
    }

    #[test]
    fn open_missing_file_is_a_selection_error() {
        let dir = tempdir().unwrap();
        let err = FileBinding::open(dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, BridgeError::Selection { .. }));
    }

    #[test]
    fn directory_selection_lists_spreadsheets_only() {
        let dir = tempdir().unwrap();
        let b = touch(dir.path(), "b.xlsx");
        let a = touch(dir.path(), "a.XLSX");
        touch(dir.path(), "notes.txt");

        let found = candidates_from_selection(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn empty_directory_selection_is_reported() {
        let dir = tempdir().unwrap();
        let err = candidates_from_selection(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BridgeError::NoSpreadsheet { .. }));
    }

    #[test]
    fn single_file_selection_must_be_xlsx() {
        let dir = tempdir().unwrap();
        let roster = touch(dir.path(), "roster.xlsx");
        let legacy = touch(dir.path(), "students.xls");
        touch(dir.path(), "students.ods");

        let found = candidates_from_selection(roster.to_str().unwrap()).unwrap();
        assert_eq!(found, vec![roster]);

        let err = candidates_from_selection(legacy.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BridgeError::NoSpreadsheet { .. }));
        let err = candidates_from_selection(dir.path().join("students.ods").to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, BridgeError::NoSpreadsheet { .. }));
    }

    #[test]
    fn rebind_requires_name_and_id() {
        let dir = tempdir().unwrap();
        let wanted = touch(dir.path(), "roster.xlsx");
        let other_dir = tempdir().unwrap();
        let impostor = touch(other_dir.path(), "roster.xlsx");

        let stored = FileBinding::open(&wanted).unwrap().metadata().clone();

        let err = rebind(&stored, &[impostor.clone()]).unwrap_err();
        assert!(matches!(err, BridgeError::NotFound { .. }));

        let found = rebind(&stored, &[impostor, wanted.clone()]).unwrap();
        assert_eq!(found.path(), fs::canonicalize(&wanted).unwrap());
    }

    #[test]
    fn read_only_file_prompts_until_granted() {
        let dir = tempdir().unwrap();
        let path = touch(dir.path(), "roster.xlsx");
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let binding = FileBinding::open(&path).unwrap();
        assert_eq!(binding.query_access(), Access::Prompt);
        assert_eq!(binding.request_access(), Access::Granted);
        assert_eq!(binding.query_access(), Access::Granted);
    }

    #[test]
    fn vanished_file_is_left_for_the_write_to_report() {
        let dir = tempdir().unwrap();
        let path = touch(dir.path(), "roster.xlsx");
        let binding = FileBinding::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(binding.query_access(), Access::Granted);
    }
}
