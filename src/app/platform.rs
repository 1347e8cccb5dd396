//! Platform helpers for extracted files

use std::io;
use std::path::Path;

/// User, group and other execute bits
#[cfg(unix)]
const MODE_EXECUTE: u32 = 0o111;

/// Make `path` executable (or not) for user, group and other
///
/// Only the three execute bits are touched, and only when whether all
/// three are set differs from `executable`. No-op where files carry no
/// POSIX permission bits.
#[cfg(unix)]
pub fn set_executable(path: &Path, executable: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    let mode = permissions.mode();

    // Only a full 0o111 counts as executable; partial bits are left alone
    // when clearing.
    if ((mode & MODE_EXECUTE) == MODE_EXECUTE) == executable {
        return Ok(());
    }

    let new_mode = if executable {
        mode | MODE_EXECUTE
    } else {
        mode & !MODE_EXECUTE
    };
    tracing::debug!(
        "Changing mode of {} from {:o} to {:o}",
        path.display(),
        mode & 0o7777,
        new_mode & 0o7777
    );
    permissions.set_mode(new_mode);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path, _executable: bool) -> io::Result<()> {
    Ok(())
}
