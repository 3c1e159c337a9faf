//! All-or-nothing publication of an [`OutputBundle`].
//!
//! The bundle is written into a staging directory beside the target and only
//! then swapped into place, so readers never observe a half-written tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use crate::bundle::OutputBundle;
use crate::error::{OutputError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub target: PathBuf,
    pub files: usize,
    pub bytes: usize,
    /// An earlier tree at `target` was replaced.
    pub replaced: bool,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn sibling(target: &Path, prefix: &str) -> Result<PathBuf> {
    let parent = target
        .parent()
        .ok_or_else(|| OutputError::NoParent(target.to_path_buf()))?;
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| OutputError::NoParent(target.to_path_buf()))?;
    Ok(parent.join(format!(".{prefix}-{name}-{}", std::process::id())))
}

fn stage(bundle: &OutputBundle, staging: &Path) -> Result<()> {
    if staging.exists() {
        fs::remove_dir_all(staging).map_err(io_error(staging))?;
    }
    fs::create_dir_all(staging).map_err(io_error(staging))?;
    for (relative, bytes) in bundle.files() {
        let path = staging.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(&path, bytes).map_err(io_error(&path))?;
    }
    Ok(())
}

fn publish(staging: &Path, target: &Path) -> Result<bool> {
    if !target.exists() {
        fs::rename(staging, target).map_err(|source| OutputError::Publish {
            from: staging.to_path_buf(),
            to: target.to_path_buf(),
            source,
        })?;
        return Ok(false);
    }

    let backup = sibling(target, "previous")?;
    fs::rename(target, &backup).map_err(|source| OutputError::Publish {
        from: target.to_path_buf(),
        to: backup.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(staging, target) {
        if let Err(restore) = fs::rename(&backup, target) {
            warn!(
                backup = %backup.display(),
                error = %restore,
                "failed to restore previous output"
            );
        }
        return Err(OutputError::Publish {
            from: staging.to_path_buf(),
            to: target.to_path_buf(),
            source,
        });
    }
    if let Err(error) = fs::remove_dir_all(&backup) {
        warn!(backup = %backup.display(), %error, "failed to remove previous output");
    }
    Ok(true)
}

/// Writes `bundle` so that it becomes the complete content of `target`.
///
/// Any earlier content of `target` is replaced only after every file has
/// been written. On failure `target` is left as it was.
pub fn write_bundle(bundle: &OutputBundle, target: &Path) -> Result<WriteSummary> {
    let span = info_span!("write_output", path = %target.display());
    let _guard = span.enter();
    let start = Instant::now();

    let staging = sibling(target, "staging")?;
    if let Some(parent) = staging.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    debug!(staging = %staging.display(), files = bundle.len(), "staging output");

    let published = stage(bundle, &staging).and_then(|()| publish(&staging, target));
    let replaced = match published {
        Ok(replaced) => replaced,
        Err(error) => {
            if staging.exists() {
                let _ = fs::remove_dir_all(&staging);
            }
            return Err(error);
        }
    };

    let summary = WriteSummary {
        target: target.to_path_buf(),
        files: bundle.len(),
        bytes: bundle.total_bytes(),
        replaced,
    };
    info!(
        files = summary.files,
        bytes = summary.bytes,
        replaced,
        duration_ms = start.elapsed().as_millis(),
        "output written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staging_name_sits_beside_target() {
        let staging = sibling(Path::new("/out/2016-2017"), "staging").unwrap();
        assert_eq!(staging.parent(), Some(Path::new("/out")));
        let name = staging.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".staging-2016-2017-"));
    }

    #[test]
    fn failed_staging_keeps_previous_tree() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("2016-2017");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("modules.json"), "[]\n").unwrap();

        // A file path that is also a directory path cannot be staged.
        let mut bundle = OutputBundle::new(2);
        bundle.add_json("modules.json", &Vec::<String>::new()).unwrap();
        bundle.add_json("modules.json/inner.json", &1).unwrap();

        assert!(write_bundle(&bundle, &target).is_err());
        assert_eq!(fs::read_to_string(target.join("modules.json")).unwrap(), "[]\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(leftovers.is_empty());
    }
}
