use std::path::{Path, PathBuf};
use tracing_batteries::prelude::*;

pub const UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Image content types we accept, and the extension we store them under.
pub const ALLOWED_CONTENT_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Whether a value starts with a URI scheme (`https:`, `data:`, ...).
pub fn has_scheme(value: &str) -> bool {
    value.find(':').is_some_and(|pos| {
        pos > 0
            && value[..pos].starts_with(|c: char| c.is_ascii_alphabetic())
            && value[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// The byte offset of the first `uploads/` path segment, if there is one.
pub fn uploads_offset(path: &str) -> Option<usize> {
    if path.starts_with("uploads/") {
        Some(0)
    } else {
        path.find("/uploads/").map(|i| i + 1)
    }
}

/// Reduces any stored image path to the canonical `uploads/<folder>/<file>`
/// form: scheme and host are dropped, as are leading slashes and anything
/// which precedes the `uploads/` segment.
pub fn sanitize_stored_path(value: &str) -> String {
    let mut path = value.trim();

    if has_scheme(path) {
        path = path.split_once(':').map(|(_, rest)| rest).unwrap_or_default();
        path = strip_authority(path);
    } else if path.starts_with("//") {
        path = strip_authority(path);
    }

    let path = path.trim_start_matches('/');
    match uploads_offset(path) {
        Some(offset) => path[offset..].to_string(),
        None => path.to_string(),
    }
}

fn strip_authority(path: &str) -> &str {
    match path.strip_prefix("//") {
        Some(rest) => rest.split_once('/').map(|(_host, p)| p).unwrap_or_default(),
        None => path,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("'{0}' is not a valid upload folder")]
    InvalidFolder(String),

    #[error("files of type '{0}' may not be uploaded")]
    UnsupportedType(String),

    #[error("the uploaded file was empty")]
    Empty,

    #[error("the uploaded file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("the uploaded file could not be written: {0}")]
    Io(#[from] std::io::Error),
}

/// Where uploads are written and how large they may be.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    /// The public directory which contains the `uploads/` tree.
    pub root: PathBuf,
    pub max_size: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            max_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl UploadPolicy {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.max_size {
            Err(UploadError::TooLarge {
                limit: self.max_size,
            })
        } else {
            Ok(())
        }
    }
}

/// The stored extension for an accepted content type. Parameters such as
/// `; charset=...` are ignored.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    ALLOWED_CONTENT_TYPES
        .iter()
        .find(|(allowed, _)| allowed.eq_ignore_ascii_case(mime))
        .map(|(_, ext)| *ext)
}

/// A filename which cannot collide with any other upload, independent of
/// whatever the client called the file.
pub fn upload_filename(extension: &str) -> String {
    format!(
        "{}_{}.{}",
        chrono::Utc::now().format("%Y%m%d%H%M%S"),
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

/// Upload folders are a single path segment of `[A-Za-z0-9_-]`.
pub fn valid_folder(folder: &str) -> bool {
    !folder.is_empty()
        && folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

/// Validates and writes an uploaded image, returning its canonical relative
/// path. Nothing is left on disk unless the whole file was written.
pub async fn persist_upload(
    policy: &UploadPolicy,
    folder: &str,
    content_type: &str,
    content: &[u8],
) -> Result<String, UploadError> {
    if !valid_folder(folder) {
        return Err(UploadError::InvalidFolder(folder.to_string()));
    }

    let extension = extension_for(content_type)
        .ok_or_else(|| UploadError::UnsupportedType(content_type.to_string()))?;

    if content.is_empty() {
        return Err(UploadError::Empty);
    }
    policy.check_size(content.len())?;

    let filename = upload_filename(extension);
    let directory = policy.root.join(UPLOADS_DIR).join(folder);
    tokio::fs::create_dir_all(&directory).await?;

    let partial = directory.join(format!(".{filename}.part"));
    let target = directory.join(&filename);

    if let Err(err) = write_then_rename(&partial, &target, content).await {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            debug!("Unable to remove partial upload {}: {}", partial.display(), cleanup);
        }

        return Err(err.into());
    }

    let path = format!("{UPLOADS_DIR}/{folder}/{filename}");
    info!({ upload.path = %path, upload.size = content.len() }, "Stored uploaded image");

    Ok(path)
}

async fn write_then_rename(partial: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, content).await?;
    tokio::fs::rename(partial, target).await
}
