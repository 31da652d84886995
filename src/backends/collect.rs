//! Collector
//!
//! Resolves (identifier, bytes) pairs from a directory walk and an explicit file
//! list. Every visited entry produces a `Visit`, so entry-level failures are
//! recorded and the walk goes on, while a root that cannot be opened aborts it.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{EncodeError, SkipReason};
use crate::core::model::{Collection, Origin, SourceItem};
use crate::core::paths::{basename_identifier, relative_identifier};

/// Result of visiting one walk entry
#[derive(Debug)]
pub enum Visit {
    /// A directory; nothing to record
    Descend,
    Collect(SourceItem),
    Skip(SkipReason),
    Abort(EncodeError),
}

/// Visit a single entry produced by walking `root`
pub fn visit_entry(root: &Path, entry: walkdir::Result<DirEntry>) -> Visit {
    let entry = match entry {
        Ok(entry) => entry,
        Err(err) if err.depth() == 0 => {
            return Visit::Abort(EncodeError::WalkStart {
                root: root.to_path_buf(),
                source: err,
            })
        }
        Err(err) => {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            return Visit::Skip(SkipReason::Access { path, source: err });
        }
    };

    if entry.file_type().is_dir() {
        return Visit::Descend;
    }

    let path = entry.path();
    let Some(identifier) = relative_identifier(path, root) else {
        return Visit::Skip(SkipReason::RelativePath {
            path: path.to_path_buf(),
        });
    };

    match fs::read(path) {
        Ok(content) => Visit::Collect(SourceItem {
            identifier,
            path: path.to_path_buf(),
            origin: Origin::Directory,
            content,
        }),
        Err(source) => Visit::Skip(SkipReason::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolve one explicitly listed file, keyed by its basename
pub fn visit_file(path: &Path) -> Result<SourceItem, SkipReason> {
    let metadata = fs::metadata(path).map_err(|source| SkipReason::Missing {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        return Err(SkipReason::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read(path).map_err(|source| SkipReason::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SourceItem {
        identifier: basename_identifier(path),
        path: path.to_path_buf(),
        origin: Origin::Explicit,
        content,
    })
}

/// Walk `root` recursively into `collection`
pub fn collect_dir(root: &Path, collection: &mut Collection) -> Result<(), EncodeError> {
    for entry in WalkDir::new(root).follow_links(false) {
        match visit_entry(root, entry) {
            Visit::Descend => {}
            Visit::Collect(item) => collection.collect(item),
            Visit::Skip(reason) => collection.skip(reason),
            Visit::Abort(err) => return Err(err),
        }
    }
    Ok(())
}

/// Collect the directory (if any) first, then the explicit files in the order given.
///
/// Fails only when the directory walk cannot be started.
pub fn collect(dir: Option<&Path>, files: &[PathBuf]) -> Result<Collection, EncodeError> {
    let mut collection = Collection::new();

    if let Some(root) = dir {
        collect_dir(root, &mut collection)?;
    }

    for path in files {
        match visit_file(path) {
            Ok(item) => collection.collect(item),
            Err(reason) => collection.skip(reason),
        }
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Outcome;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_dir_uses_relative_paths() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("a.txt"), "hello");
        write_file(&temp.path().join("sub").join("b.txt"), "world");

        let collection = collect(Some(temp.path()), &[]).unwrap();

        let nested = Path::new("sub").join("b.txt").to_string_lossy().into_owned();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.items["a.txt"].inflate(), b"hello");
        assert_eq!(collection.items[&nested].inflate(), b"world");
        assert!(collection.outcomes.iter().all(|o| !o.is_skipped()));
    }

    #[test]
    fn test_collect_empty_dir() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();

        let collection = collect(Some(temp.path()), &[]).unwrap();
        assert!(collection.is_empty());
        assert!(collection.outcomes.is_empty());
    }

    #[test]
    fn test_collect_dir_missing_root_is_fatal() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("does-not-exist");

        let err = collect(Some(&root), &[]).unwrap_err();
        assert!(matches!(err, EncodeError::WalkStart { .. }));
    }

    #[test]
    fn test_collect_dir_root_is_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("single.txt");
        write_file(&file, "only");

        let collection = collect(Some(&file), &[]).unwrap();
        assert_eq!(collection.items["."].inflate(), b"only");
    }

    #[test]
    fn test_explicit_file_uses_basename() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("x").join("report.csv");
        write_file(&file, "1,2,3");

        let collection = collect(None, &[file.clone()]).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items["report.csv"].inflate(), b"1,2,3");
        assert!(matches!(
            &collection.outcomes[0],
            Outcome::Included { origin: Origin::Explicit, path, .. } if *path == file
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_skipped() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.txt");

        let collection = collect(None, &[missing]).unwrap();
        assert!(collection.is_empty());
        assert!(matches!(
            collection.outcomes[0],
            Outcome::Skipped(SkipReason::Missing { .. })
        ));
    }

    #[test]
    fn test_explicit_directory_is_skipped() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested");
        fs::create_dir(&dir).unwrap();

        let collection = collect(None, &[dir]).unwrap();
        assert!(collection.is_empty());
        assert!(matches!(
            collection.outcomes[0],
            Outcome::Skipped(SkipReason::IsDirectory { .. })
        ));
    }

    #[test]
    fn test_explicit_overwrites_directory_entry() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("root");
        write_file(&root.join("x.txt"), "from dir");
        let other = temp.path().join("elsewhere").join("x.txt");
        write_file(&other, "from args");

        let collection = collect(Some(&root), &[other]).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items["x.txt"].inflate(), b"from args");
        assert!(matches!(
            collection.outcomes.last(),
            Some(Outcome::Included { replaced: true, .. })
        ));
    }

    #[test]
    fn test_explicit_files_keep_argument_order() {
        let temp = tempdir().unwrap();
        let first = temp.path().join("one").join("same.txt");
        let second = temp.path().join("two").join("same.txt");
        write_file(&first, "first");
        write_file(&second, "second");

        let collection = collect(None, &[first, second]).unwrap();
        assert_eq!(collection.items["same.txt"].inflate(), b"second");
    }

    #[test]
    fn test_skip_does_not_stop_later_files() {
        let temp = tempdir().unwrap();
        let good = temp.path().join("good.txt");
        write_file(&good, "ok");

        let collection = collect(None, &[temp.path().join("gone.txt"), good]).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.outcomes.len(), 2);
        assert!(collection.outcomes[0].is_skipped());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        write_file(&temp.path().join("visible.txt"), "seen");
        let locked = temp.path().join("locked");
        write_file(&locked.join("hidden.txt"), "unseen");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // permission bits do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let collection = collect(Some(temp.path()), &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let collection = collection.unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items["visible.txt"].inflate(), b"seen");
        assert!(collection.outcomes.iter().any(|o| matches!(
            o,
            Outcome::Skipped(SkipReason::Access { path, .. }) if *path == locked
        )));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped_not_fatal() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("real.txt"), "real");
        std::os::unix::fs::symlink(temp.path().join("nowhere"), temp.path().join("link")).unwrap();

        let collection = collect(Some(temp.path()), &[]).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.outcomes.iter().any(|o| matches!(
            o,
            Outcome::Skipped(SkipReason::Read { .. })
        )));
    }
}
