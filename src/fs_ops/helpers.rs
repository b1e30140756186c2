//! I/O error helpers.
//!
//! Turns an `io::Error` into a one-line description with the operation, the
//! path and a platform-aware hint, so every `ZapError` context string reads the
//! same way in logs.
//!
//! Usage:
//!   fs::read_dir(dir).map_err(traversal_error(dir))?;
//!   let ctx = describe_io("rename", path, &e);

use std::io;
use std::path::Path;

use crate::errors::ZapError;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub fn describe_io(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (entry lives on another filesystem; it cannot be renamed up a level)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; is another process using it?)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path vanished; was it changed while zapping?)");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str(" (target already exists)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" (entry lives on another drive)"),    // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path vanished; was it changed while zapping?)"),
                80 | 183 => msg.push_str(" (target already exists)"), // ERROR_FILE_EXISTS / ERROR_ALREADY_EXISTS
                206 => msg.push_str(" (filename or path too long)"), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" (permission denied)"),
            io::ErrorKind::NotFound => msg.push_str(" (path vanished; was it changed while zapping?)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (target already exists)"),
            _ => {}
        }
    }

    msg
}

/// Adapter for `.map_err(...)` on a WalkDir item. Reports the entry that
/// failed, falling back to the walk root.
pub fn walk_error<'a>(root: &'a Path) -> impl FnOnce(walkdir::Error) -> ZapError + 'a {
    move |e: walkdir::Error| {
        let path = e.path().unwrap_or(root).to_path_buf();
        let context = match e.io_error() {
            Some(io) => describe_io("enumerate", &path, io),
            None => format!("enumerate '{}': {e}", path.display()),
        };
        ZapError::Traversal { path, context }
    }
}

/// Adapter for `.map_err(...)` during traversal: io::Error -> ZapError::Traversal.
pub fn traversal_error<'a>(path: &'a Path) -> impl FnOnce(io::Error) -> ZapError + 'a {
    move |e: io::Error| ZapError::Traversal {
        path: path.to_path_buf(),
        context: describe_io("enumerate", path, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_gets_a_hint() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = describe_io("enumerate", Path::new("/nope"), &e);
        assert!(msg.starts_with("enumerate '/nope': gone"));
        assert!(msg.contains("vanished"));
    }

    #[test]
    fn traversal_adapter_keeps_the_path() {
        let err = traversal_error(Path::new("/a/b"))(io::Error::other("boom"));
        match err {
            ZapError::Traversal { path, context } => {
                assert_eq!(path, Path::new("/a/b"));
                assert!(context.contains("boom"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
