use crate::errors::AppError;
use std::path::{Component, Path, PathBuf};

/// Resolves an untrusted relative path against `root`, guaranteeing the
/// result never lies outside it.
///
/// The check is purely lexical: the input is anchored at a synthetic root
/// before normalization, so absolute-looking prefixes are neutralized and
/// `..` resolves against the anchor, never the real filesystem root. An
/// input that climbs above the anchor and then descends into named
/// segments is an escape attempt and is rejected; one that merely ends at
/// or above the anchor resolves to `root` itself. The filesystem is never
/// consulted here; existence checks belong to whatever operation follows.
/// Symlinks inside `root` that point outside it are not caught by this
/// check (documented residual risk).
pub fn confine(root: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let anchored = Path::new("/").join(relative);

    let mut normalized = PathBuf::new();
    let mut escaped = false;
    for component in anchored.components() {
        match component {
            Component::Normal(part) => {
                if escaped {
                    return Err(AppError::PathEscape);
                }
                normalized.push(part);
            }
            Component::ParentDir => {
                if !normalized.pop() {
                    escaped = true;
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let candidate = if normalized.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(&normalized)
    };

    // component-wise prefix check: /home/user2 is not under /home/user
    if candidate.starts_with(root) {
        Ok(candidate)
    } else {
        Err(AppError::PathEscape)
    }
}
