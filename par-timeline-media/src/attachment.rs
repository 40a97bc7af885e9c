//! Local paths for attachments and the blocking download step for one file.

use crate::error::FetchError;
use crate::source::AttachmentSource;
use std::collections::hash_map::DefaultHasher;
use std::fs::{self, DirBuilder, OpenOptions};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A requested download and the file it lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub source_url: String,
    pub local_path: PathBuf,
}

impl Attachment {
    /// Map `url` to `<dir>/<last path segment>`.
    pub fn new(url: &str, dir: &Path) -> Self {
        Self {
            source_url: url.to_string(),
            local_path: dir.join(attachment_file_name(url)),
        }
    }

    /// Whether something already sits at the local path.
    pub fn is_present(&self) -> bool {
        self.local_path.exists()
    }
}

/// File name for a URL: its final path segment.
///
/// URLs without a usable segment (trailing slash, `..`, separators) get a
/// name derived from a hash of the whole URL instead. The hash is
/// `DefaultHasher`, so the name is stable within a build but may change
/// across Rust releases; a cached fallback file is then fetched again.
pub fn attachment_file_name(url: &str) -> String {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .map(str::to_string),
    };

    match segment.filter(|name| is_safe_file_name(name)) {
        Some(name) => name,
        None => {
            let mut hasher = DefaultHasher::new();
            url.hash(&mut hasher);
            format!("attachment-{:016x}", hasher.finish())
        }
    }
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// What a successful download step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    /// A file was already there; nothing was fetched.
    AlreadyPresent,
    /// The body was fetched and written.
    Downloaded { bytes: usize },
}

/// Fetch one attachment to disk. Blocking; run it on the blocking pool.
///
/// An existing file short-circuits to success. The final write uses an
/// exclusive create, so a file that appears between the existence check and
/// the write is an error, not a success.
pub fn download_attachment(
    source: &dyn AttachmentSource,
    attachment: &Attachment,
) -> Result<DownloadState, FetchError> {
    if attachment.is_present() {
        return Ok(DownloadState::AlreadyPresent);
    }

    let url = attachment.source_url.as_str();
    let response = source.get(url)?;
    if response.status != 200 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    if let Some(dir) = attachment.local_path.parent() {
        ensure_dir(dir)?;
    }
    write_exclusive(&attachment.local_path, &response.body)?;

    Ok(DownloadState::Downloaded {
        bytes: response.body.len(),
    })
}

/// Create the attachment directory. Another task creating it first is fine.
fn ensure_dir(dir: &Path) -> Result<(), FetchError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o775);
    }
    builder
        .create(dir)
        .map_err(|e| FetchError::filesystem("create directory", dir, e))
}

fn write_exclusive(path: &Path, body: &[u8]) -> Result<(), FetchError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    let mut file = options
        .open(path)
        .map_err(|e| FetchError::filesystem("create", path, e))?;

    if let Err(e) = file.write_all(body) {
        drop(file);
        // A truncated file would be treated as a finished download next time.
        let _ = fs::remove_file(path);
        return Err(FetchError::filesystem("write", path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct Canned {
        response: SourceResponse,
        calls: AtomicUsize,
    }

    impl AttachmentSource for Canned {
        fn get(&self, _url: &str) -> Result<SourceResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn canned(status: u16, body: &[u8]) -> Canned {
        Canned {
            response: SourceResponse {
                status,
                body: body.to_vec(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_file_name_is_last_segment() {
        assert_eq!(
            attachment_file_name("https://pbs.example.com/media/Cx1.jpg"),
            "Cx1.jpg"
        );
        assert_eq!(
            attachment_file_name("https://pbs.example.com/media/Cx1.jpg?name=large"),
            "Cx1.jpg"
        );
        assert_eq!(attachment_file_name("media/clip.mp4"), "clip.mp4");
    }

    #[test]
    fn test_file_name_falls_back_to_hash() {
        let name = attachment_file_name("https://pbs.example.com/media/");
        assert!(name.starts_with("attachment-"));
        assert_eq!(name, attachment_file_name("https://pbs.example.com/media/"));
        assert_ne!(name, attachment_file_name("https://other.example.com/"));
    }

    #[test]
    fn test_download_writes_body_and_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("attachments");
        let attachment = Attachment::new("https://example.com/a.png", &dir);
        let source = canned(200, b"png-bytes");

        let state = download_attachment(&source, &attachment).unwrap();
        assert_eq!(state, DownloadState::Downloaded { bytes: 9 });
        assert_eq!(fs::read(&attachment.local_path).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_existing_file_skips_network() {
        let temp_dir = TempDir::new().unwrap();
        let attachment = Attachment::new("https://example.com/a.png", temp_dir.path());
        fs::write(&attachment.local_path, b"old").unwrap();
        let source = canned(200, b"new");

        let state = download_attachment(&source, &attachment).unwrap();
        assert_eq!(state, DownloadState::AlreadyPresent);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read(&attachment.local_path).unwrap(), b"old");
    }

    #[test]
    fn test_non_200_is_status_error_and_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let attachment = Attachment::new("https://example.com/a.png", temp_dir.path());
        let source = canned(404, b"not found");

        let err = download_attachment(&source, &attachment).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(!attachment.is_present());
    }

    #[test]
    fn test_exclusive_write_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.png");
        fs::write(&path, b"first").unwrap();

        let err = write_exclusive(&path, b"second").unwrap_err();
        assert!(matches!(err, FetchError::Filesystem { action: "create", .. }));
        assert_eq!(fs::read(&path).unwrap(), b"first");
    }
}
