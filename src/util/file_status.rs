//! File attribute helpers.
//!
//! [`copy_file_stat`] gives a freshly written output file the modification
//! time, ownership and permission bits of its source, as gzip does. Times go
//! through `filetime`; ownership uses `nix` and is Unix-only.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copy mtime, owner and permission bits from `src` to `dst`.
///
/// `dst` must be a regular file. The access time is set to now. A failed
/// `chown` with `EPERM` is ignored: unprivileged users cannot give files
/// away, and the other attributes are still applied.
pub fn copy_file_stat(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let meta = fs::metadata(src)?;

    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, FileTime::now(), mtime)?;

    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::unistd::{chown, Gid, Uid};
        use std::os::unix::fs::MetadataExt;

        match chown(dst, Some(Uid::from_raw(meta.uid())), Some(Gid::from_raw(meta.gid()))) {
            Ok(()) | Err(Errno::EPERM) => {}
            Err(e) => return Err(io::Error::from(e)),
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = meta.permissions().mode() & 0o7777;
        fs::set_permissions(dst, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    fs::set_permissions(dst, meta.permissions())?;

    Ok(())
}

/// `true` if `path` is (or links to) a regular file.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
