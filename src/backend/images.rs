/**
 * Image Storage
 *
 * Post images live as files under a single root directory and are served
 * read-only at `/images`. Deleting or replacing a post removes its old file.
 */

use std::path::{Path, PathBuf};

/// File name an image URL refers to, if any.
///
/// Two URLs name the same file exactly when this returns the same value.
pub fn image_file_name(image_url: &str) -> Option<String> {
    let normalized = image_url.replace('\\', "/");
    let file_name = normalized.rsplit('/').next()?;
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return None;
    }
    Some(file_name.to_string())
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an image URL to a file under the root.
    ///
    /// Only the final path component is used, so `images/a.png`,
    /// `/images/a.png` and `a.png` all name the same file and no URL can
    /// point outside the root.
    pub fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        image_file_name(image_url).map(|file_name| self.root.join(file_name))
    }

    /// Delete the file behind `image_url`.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn clear(&self, image_url: &str) {
        let Some(path) = self.resolve(image_url) else {
            tracing::debug!("No image file to clear for {:?}", image_url);
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!("Removed image {}", path.display()),
            Err(e) => tracing::warn!("Failed to remove image {}: {}", path.display(), e),
        }
    }
}
