//! Media table: every raster image of the package, materialized once.

use crate::container::{OoxmlContainer, PartEntry};
use crate::error::Error;
use crate::model::{is_raster_path, MediaAsset};
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Folder holding the presentation's media parts.
pub const MEDIA_FOLDER: &str = "ppt/media/";

/// Materialized images, in media-folder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaTable {
    assets: Vec<Arc<MediaAsset>>,
}

impl MediaTable {
    /// Read every raster image under [`MEDIA_FOLDER`].
    ///
    /// Entries are read concurrently. An entry that cannot be read is logged
    /// and left out; it never affects the others.
    pub fn extract(container: &OoxmlContainer) -> Self {
        let entries: Vec<PartEntry> = container
            .list_folder(MEDIA_FOLDER)
            .into_iter()
            .filter(|e| is_raster_path(&e.relative_path))
            .collect();

        let assets: Vec<Arc<MediaAsset>> = entries
            .par_iter()
            .filter_map(|entry| match read_asset(container, entry) {
                Ok(asset) => Some(Arc::new(asset)),
                Err(e) => {
                    warn!("skipping media {}: {}", entry.path, e);
                    None
                }
            })
            .collect();

        debug!(
            "extracted {} of {} media entries",
            assets.len(),
            entries.len()
        );
        Self { assets }
    }

    /// Build a table from already materialized assets.
    pub fn from_assets(assets: Vec<Arc<MediaAsset>>) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &[Arc<MediaAsset>] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Find the asset a relationship target points at.
    ///
    /// An exact archive path match wins. Otherwise the file names are
    /// compared by containment in either direction, which tolerates targets
    /// written with unexpected prefixes.
    pub fn find_for_target(&self, target: &str) -> Option<&Arc<MediaAsset>> {
        if let Some(exact) = self.assets.iter().find(|a| a.path == target) {
            return Some(exact);
        }
        let target_file = last_component(target);
        self.assets.iter().find(|asset| {
            (!target_file.is_empty() && asset.name.contains(target_file))
                || target.contains(asset.file_name())
        })
    }
}

fn last_component(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn read_asset(container: &OoxmlContainer, entry: &PartEntry) -> crate::Result<MediaAsset> {
    let data = container
        .read_binary(&entry.path)
        .map_err(|e| Error::MediaExtract {
            name: entry.path.clone(),
            reason: e.to_string(),
        })?;
    Ok(MediaAsset::new(
        entry.relative_path.clone(),
        entry.path.clone(),
        data,
    ))
}
