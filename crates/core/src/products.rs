//! Product snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as captured at add-to-cart time.
///
/// The cart trusts this snapshot and never re-fetches it; price or stock
/// drift after add time is reconciled server-side when the order is
/// created, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Unit price in major currency units.
    pub price: Decimal,

    /// Last-known available stock. Zero means no ceiling is applied.
    pub stock: u32,

    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,

    /// Cover image URL.
    #[serde(default)]
    pub cover_image: Option<String>,

    /// Legacy image slot.
    #[serde(default)]
    pub image1: Option<String>,

    /// Legacy image slot.
    #[serde(default)]
    pub image2: Option<String>,
}

impl ProductSnapshot {
    /// The image the cart should display for this product, if any.
    ///
    /// Candidates in order: first gallery image, cover image, then the two
    /// legacy slots.
    #[must_use]
    pub fn display_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.cover_image.as_deref())
            .or(self.image1.as_deref())
            .or(self.image2.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProductSnapshot {
        ProductSnapshot {
            id: 1,
            name: "Home Jersey".to_owned(),
            price: Decimal::from(100),
            stock: 10,
            images: Vec::new(),
            cover_image: None,
            image1: None,
            image2: None,
        }
    }

    #[test]
    fn display_image_prefers_gallery() {
        let product = ProductSnapshot {
            images: vec!["gallery.jpg".to_owned()],
            cover_image: Some("cover.jpg".to_owned()),
            image1: Some("one.jpg".to_owned()),
            ..snapshot()
        };

        assert_eq!(product.display_image(), Some("gallery.jpg"));
    }

    #[test]
    fn display_image_falls_back_to_cover_then_legacy() {
        let with_cover = ProductSnapshot {
            cover_image: Some("cover.jpg".to_owned()),
            image2: Some("two.jpg".to_owned()),
            ..snapshot()
        };
        let legacy_only = ProductSnapshot {
            image2: Some("two.jpg".to_owned()),
            ..snapshot()
        };

        assert_eq!(with_cover.display_image(), Some("cover.jpg"));
        assert_eq!(legacy_only.display_image(), Some("two.jpg"));
    }

    #[test]
    fn display_image_absent_when_no_candidates() {
        assert_eq!(snapshot().display_image(), None);
    }
}
