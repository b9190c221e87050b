//! Template resource access.

use crate::image::OwnedImage;
use crate::util::{FrameGateError, FrameGateResult};
use std::collections::HashMap;

/// Resolves a template identifier to a decoded grayscale image.
pub trait TemplateSource {
    /// Loads and decodes the resource named by `id`.
    fn load_gray(&self, id: &str) -> FrameGateResult<OwnedImage>;
}

/// In-memory template source keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct MemoryTemplateSource {
    images: HashMap<String, OwnedImage>,
}

impl MemoryTemplateSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `img` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, img: OwnedImage) {
        self.images.insert(id.into(), img);
    }

    /// Builder form of [`MemoryTemplateSource::insert`].
    pub fn with(mut self, id: impl Into<String>, img: OwnedImage) -> Self {
        self.insert(id, img);
        self
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn load_gray(&self, id: &str) -> FrameGateResult<OwnedImage> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| FrameGateError::ImageIo {
                reason: "no such template resource".to_string(),
            })
    }
}

#[cfg(feature = "image-io")]
pub use fs::FsTemplateSource;

#[cfg(feature = "image-io")]
mod fs {
    use super::TemplateSource;
    use crate::image::io::load_gray_image;
    use crate::image::OwnedImage;
    use crate::util::FrameGateResult;
    use std::path::PathBuf;

    /// Loads templates from image files through the `image` crate.
    ///
    /// Relative identifiers resolve against `root` when one is set, otherwise
    /// against the process working directory.
    #[derive(Clone, Debug, Default)]
    pub struct FsTemplateSource {
        root: Option<PathBuf>,
    }

    impl FsTemplateSource {
        /// Resolves identifiers as plain paths.
        pub fn new() -> Self {
            Self::default()
        }

        /// Resolves relative identifiers against `root`.
        pub fn with_root(root: impl Into<PathBuf>) -> Self {
            Self {
                root: Some(root.into()),
            }
        }

        fn resolve(&self, id: &str) -> PathBuf {
            match &self.root {
                Some(root) => root.join(id),
                None => PathBuf::from(id),
            }
        }
    }

    impl TemplateSource for FsTemplateSource {
        fn load_gray(&self, id: &str) -> FrameGateResult<OwnedImage> {
            load_gray_image(self.resolve(id))
        }
    }
}
