use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_PREFIX: &str = "/img";

/// Turns a recipe's image filename into the url the avatar should load.
///
/// A filename resolves when it is a single non-empty path component with no
/// surrounding whitespace and, if an image directory is known, a file of that
/// name exists there and the prefix is not empty. Anything else renders the
/// title fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    prefix: String,
    image_dir: Option<PathBuf>,
}

impl Default for AssetResolver {
    fn default() -> Self {
        AssetResolver::new(DEFAULT_IMAGE_PREFIX)
    }
}

impl AssetResolver {
    pub fn new(prefix: &str) -> Self {
        AssetResolver {
            prefix: prefix.trim_end_matches('/').to_string(),
            image_dir: None,
        }
    }

    pub fn with_image_dir(self, image_dir: impl Into<PathBuf>) -> Self {
        AssetResolver {
            image_dir: Some(image_dir.into()),
            ..self
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn image_dir(&self) -> Option<&Path> {
        self.image_dir.as_deref()
    }

    pub fn resolve(&self, image: &str) -> Option<String> {
        if image.trim().is_empty()
            || image.trim() != image
            || image == "."
            || image.contains(['/', '\\'])
            || image.contains("..")
        {
            return None;
        }
        if let Some(dir) = &self.image_dir {
            // Local images are only served under a non-empty prefix.
            if self.prefix.is_empty() {
                return None;
            }
            if !dir.join(image).is_file() {
                tracing::debug!(image, dir = %dir.display(), "image not found, using fallback");
                return None;
            }
        }
        Some(format!("{}/{}", self.prefix, image))
    }
}
