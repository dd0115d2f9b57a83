use std::rc::Rc;

/// Raw asset bytes, cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetData {
    bytes: Rc<[u8]>,
}

impl AssetData {
    /// Wrap fetched bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for AssetData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Stand-in image for an asset that failed to load.
///
/// Every placeholder is identical: a dark square with a gold border and a
/// fixed label. Hosts draw the label; [`rasterize`](Self::rasterize) only
/// produces the background and border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder;

impl Placeholder {
    /// Width in pixels.
    pub const WIDTH: u32 = 400;
    /// Height in pixels.
    pub const HEIGHT: u32 = 400;
    /// Background color, RGBA.
    pub const BACKGROUND: [u8; 4] = [0x1a, 0x1a, 0x1a, 0xff];
    /// Border and label color, RGBA.
    pub const ACCENT: [u8; 4] = [0xd4, 0xaf, 0x37, 0xff];
    /// Border stroke width in pixels, centered on the inset rectangle.
    pub const BORDER_WIDTH: u32 = 2;
    /// Distance from each edge to the border's centerline.
    pub const BORDER_INSET: u32 = 10;
    /// Label drawn at the center.
    pub const LABEL: &'static str = "Image Not Available";

    /// Label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        Self::LABEL
    }

    /// Row-major RGBA8 pixels, `WIDTH * HEIGHT * 4` bytes.
    #[must_use]
    pub fn rasterize(self) -> Vec<u8> {
        let half = Self::BORDER_WIDTH / 2;
        let outer_min = Self::BORDER_INSET - half;
        let inner_min = Self::BORDER_INSET + half;
        let outer_max_x = Self::WIDTH - Self::BORDER_INSET + half;
        let inner_max_x = Self::WIDTH - Self::BORDER_INSET - half;
        let outer_max_y = Self::HEIGHT - Self::BORDER_INSET + half;
        let inner_max_y = Self::HEIGHT - Self::BORDER_INSET - half;

        let mut pixels =
            Vec::with_capacity((Self::WIDTH * Self::HEIGHT * 4) as usize);
        for y in 0..Self::HEIGHT {
            for x in 0..Self::WIDTH {
                let in_outer = (outer_min..outer_max_x).contains(&x)
                    && (outer_min..outer_max_y).contains(&y);
                let in_inner = (inner_min..inner_max_x).contains(&x)
                    && (inner_min..inner_max_y).contains(&y);
                let color = if in_outer && !in_inner {
                    Self::ACCENT
                } else {
                    Self::BACKGROUND
                };
                pixels.extend_from_slice(&color);
            }
        }
        pixels
    }
}

/// Result of loading one key: the fetched data or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetHandle {
    /// The asset loaded (or was already cached).
    Loaded {
        /// Asset key.
        key: Rc<str>,
        /// Asset bytes.
        data: AssetData,
    },
    /// The fetch failed.
    Placeholder {
        /// Asset key.
        key: Rc<str>,
        /// The stand-in.
        placeholder: Placeholder,
    },
}

impl AssetHandle {
    /// Asset key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Loaded { key, .. } | Self::Placeholder { key, .. } => key,
        }
    }

    /// Whether this handle is a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Fetched bytes, if the load succeeded.
    #[must_use]
    pub fn data(&self) -> Option<&AssetData> {
        match self {
            Self::Loaded { data, .. } => Some(data),
            Self::Placeholder { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixels: &[u8], x: u32, y: u32) -> [u8; 4] {
        let i = ((y * Placeholder::WIDTH + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        assert_eq!(Placeholder.rasterize(), Placeholder.rasterize());
        assert_eq!(Placeholder.label(), "Image Not Available");
    }

    #[test]
    fn test_placeholder_border_sits_on_inset() {
        let pixels = Placeholder.rasterize();
        assert_eq!(pixels.len(), 400 * 400 * 4);
        assert_eq!(pixel(&pixels, 0, 0), Placeholder::BACKGROUND);
        assert_eq!(pixel(&pixels, 8, 200), Placeholder::BACKGROUND);
        assert_eq!(pixel(&pixels, 9, 200), Placeholder::ACCENT);
        assert_eq!(pixel(&pixels, 10, 200), Placeholder::ACCENT);
        assert_eq!(pixel(&pixels, 11, 200), Placeholder::BACKGROUND);
        assert_eq!(pixel(&pixels, 390, 390), Placeholder::ACCENT);
        assert_eq!(pixel(&pixels, 391, 200), Placeholder::BACKGROUND);
        assert_eq!(pixel(&pixels, 200, 200), Placeholder::BACKGROUND);
    }

    #[test]
    fn test_handle_accessors() {
        let loaded = AssetHandle::Loaded {
            key: Rc::from("a"),
            data: AssetData::from(vec![1, 2, 3]),
        };
        assert_eq!(loaded.key(), "a");
        assert!(!loaded.is_placeholder());
        assert_eq!(loaded.data().map(AssetData::len), Some(3));

        let missing = AssetHandle::Placeholder {
            key: Rc::from("b"),
            placeholder: Placeholder,
        };
        assert!(missing.is_placeholder());
        assert!(missing.data().is_none());
    }
}
