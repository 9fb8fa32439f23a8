//! Image references (logos, photos of chargers and locations).

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ids::Url;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, required_text};
use crate::shared::{OcpiError, OcpiObject};

/// What an image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageCategory {
    /// Photo of the physical device that contains one or more EVSEs.
    Charger,
    /// Location entrance photo.
    Entrance,
    /// Location overview photo.
    Location,
    /// Logo of an associated roaming network.
    Network,
    /// Logo of the charge point operator.
    Operator,
    Other,
    /// Logo of the location owner.
    Owner,
}

impl ImageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charger => "CHARGER",
            Self::Entrance => "ENTRANCE",
            Self::Location => "LOCATION",
            Self::Network => "NETWORK",
            Self::Operator => "OPERATOR",
            Self::Other => "OTHER",
            Self::Owner => "OWNER",
        }
    }
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "ImageWire")]
pub struct Image {
    url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<Url>,
    category: ImageCategory,
    /// File extension such as `jpeg` or `png`.
    #[serde(rename = "type")]
    #[validate(length(max = 4, message = "must be at most 4 characters"))]
    image_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 99999, message = "must be at most 99999 pixels"))]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 99999, message = "must be at most 99999 pixels"))]
    height: Option<u32>,
}

#[derive(Deserialize)]
struct ImageWire {
    url: Url,
    thumbnail: Option<Url>,
    category: ImageCategory,
    #[serde(rename = "type")]
    image_type: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl Image {
    pub fn new(
        url: Url,
        category: ImageCategory,
        image_type: impl Into<String>,
        thumbnail: Option<Url>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self, OcpiError> {
        let image = Self {
            url,
            thumbnail,
            category,
            image_type: required_text("type", image_type)?.to_ascii_lowercase(),
            width,
            height,
        };
        check(&image)?;
        Ok(image)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn thumbnail(&self) -> Option<&Url> {
        self.thumbnail.as_ref()
    }

    pub fn category(&self) -> ImageCategory {
        self.category
    }

    pub fn image_type(&self) -> &str {
        &self.image_type
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }
}

impl TryFrom<ImageWire> for Image {
    type Error = OcpiError;

    fn try_from(wire: ImageWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.url,
            wire.category,
            wire.image_type,
            wire.thumbnail,
            wire.width,
            wire.height,
        )
    }
}

impl OcpiObject for Image {
    const KIND: &'static str = "image";
}

value_semantics!(Image {
    url,
    category,
    image_type,
    thumbnail,
    width,
    height
});

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.url, self.category, self.image_type)?;
        if let (Some(width), Some(height)) = (self.width, self.height) {
            write!(f, " {width}x{height}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn logo_payload() -> serde_json::Value {
        json!({
            "url": "https://example.com/img/logo.jpg",
            "thumbnail": "https://example.com/img/logo_thumb.jpg",
            "category": "OPERATOR",
            "type": "jpeg",
            "width": 512,
            "height": 512
        })
    }

    #[test]
    fn parses_full_image() {
        let image = Image::parse(&logo_payload()).unwrap();
        assert_eq!(image.url().as_str(), "https://example.com/img/logo.jpg");
        assert_eq!(image.category(), ImageCategory::Operator);
        assert_eq!(image.image_type(), "jpeg");
        assert_eq!(image.width(), Some(512));
        assert_eq!(image.to_json().unwrap(), logo_payload());
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["url", "category", "type"] {
            let mut payload = logo_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = Image::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn optional_fields_are_omitted() {
        let payload = json!({
            "url": "https://example.com/img/charger.png",
            "category": "CHARGER",
            "type": "png"
        });
        let image = Image::parse(&payload).unwrap();
        assert!(image.thumbnail().is_none());
        assert!(image.width().is_none());
        assert_eq!(image.to_json().unwrap(), payload);
    }

    #[test]
    fn category_is_case_sensitive() {
        let mut payload = logo_payload();
        payload["category"] = json!("operator");
        assert!(Image::parse(&payload).is_err());
    }

    #[test]
    fn rejects_missing_url() {
        let mut payload = logo_payload();
        payload.as_object_mut().unwrap().remove("url");
        let err = Image::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn rejects_long_type() {
        let mut payload = logo_payload();
        payload["type"] = json!("jpeg2000");
        let err = Image::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn rejects_oversized_width() {
        let url: Url = "https://example.com/a.png".parse().unwrap();
        let err = Image::new(url, ImageCategory::Other, "png", None, Some(100_000), None).unwrap_err();
        assert!(matches!(err, OcpiError::InvalidArgument { field: "width", .. }));
    }
}
