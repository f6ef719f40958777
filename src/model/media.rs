//! Media assets extracted from the package.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File extensions treated as raster images.
pub const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];

/// True when `path` ends in one of [`RASTER_EXTENSIONS`] (case-insensitive).
pub fn is_raster_path(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            RASTER_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Determine MIME type from filename.
pub fn mime_from_filename(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

/// Opaque reference to an asset, stable for a given part path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(String);

impl MediaHandle {
    /// Handle for the media part at `path`.
    pub fn for_path(path: &str) -> Self {
        MediaHandle(format!("media:{}", path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raster image materialized from the media folder.
///
/// Assets are shared read-only by every element that references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// File name relative to the media folder (e.g., "image1.png")
    pub name: String,

    /// Full archive path (e.g., "ppt/media/image1.png")
    pub path: String,

    pub handle: MediaHandle,

    /// Size in bytes
    pub byte_size: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Binary data
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl MediaAsset {
    /// Create an asset for the part at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let path = path.into();
        Self {
            handle: MediaHandle::for_path(&path),
            mime_type: mime_from_filename(&name).map(String::from),
            byte_size: data.len(),
            name,
            path,
            data,
        }
    }

    /// Last path component of the asset name.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Save the asset bytes to a file.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.data)
    }
}
