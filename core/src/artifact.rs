//! The benchmark file that carries the ring size.
//!
//! The suite has no parameter input of its own, so the ring size is injected
//! by rewriting every `<value>,` literal in the test file between runs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Result of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub replaced: usize,
}

/// Replace every `"{old},"` in `text` with `"{new},"`.
///
/// A match only counts when it starts a number, i.e. the previous character
/// is neither an ASCII digit nor `-`.
pub fn rewrite(text: &str, old: i64, new: i64) -> Rewrite {
    let needle = format!("{old},");
    let replacement = format!("{new},");
    let bytes = text.as_bytes();

    let mut out = String::with_capacity(text.len());
    let mut replaced = 0usize;
    let mut last = 0usize;
    for (idx, _) in text.match_indices(&needle) {
        if idx > 0 && (bytes[idx - 1].is_ascii_digit() || bytes[idx - 1] == b'-') {
            continue;
        }
        out.push_str(&text[last..idx]);
        out.push_str(&replacement);
        last = idx + needle.len();
        replaced += 1;
    }
    out.push_str(&text[last..]);

    Rewrite { text: out, replaced }
}

/// Read-modify-write handle on the benchmark file.
#[derive(Debug, Clone)]
pub struct ConfigArtifact {
    path: PathBuf,
}

impl ConfigArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path.display()))
    }

    /// Count occurrences `rewrite` would touch for `value`.
    pub fn occurrences(&self, value: i64) -> Result<usize> {
        let text = self.read()?;
        Ok(rewrite(&text, value, value).replaced)
    }

    /// Substitute `old` with `new` in place. Returns the number of
    /// occurrences replaced; zero leaves the file untouched.
    pub fn replace(&self, old: i64, new: i64) -> Result<usize> {
        let text = self.read()?;
        let result = rewrite(&text, old, new);
        if old == new {
            return Ok(result.replaced);
        }
        if result.replaced == 0 {
            warn!(
                path = %self.path.display(),
                old,
                new,
                "no `{old},` occurrence found; ring size left unchanged"
            );
            return Ok(0);
        }
        write_atomic(&self.path, result.text.as_bytes())?;
        info!(path = %self.path.display(), old, new, replaced = result.replaced, "rewrote ring size");
        Ok(result.replaced)
    }
}

/// Write `contents` through a temporary file in the target's directory and
/// rename it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).with_context(|| format!("create temp file in {}", dir.display()))?;
    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("copy permissions of {}", path.display()))?,
        // NamedTempFile starts out 0600; new reports should be world-readable.
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
        }
        #[cfg(not(unix))]
        Err(_) => {}
    }
    tmp.write_all(contents)
        .with_context(|| format!("write temp file for {}", path.display()))?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
