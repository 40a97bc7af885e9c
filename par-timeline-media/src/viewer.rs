//! Opening downloaded attachments in the platform's default viewer.

use std::io;
use std::path::Path;

/// Hands a local file to an external program.
pub trait ViewerLauncher: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Uses the desktop's default handler (`xdg-open`, `open`, `start`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl ViewerLauncher for SystemViewer {
    #[cfg(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    fn open(&self, path: &Path) -> io::Result<()> {
        log::debug!("Opening {:?} in system viewer", path);
        open::that(path)
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )))]
    fn open(&self, path: &Path) -> io::Result<()> {
        log::debug!("No system viewer on this platform, not opening {:?}", path);
        Ok(())
    }
}
