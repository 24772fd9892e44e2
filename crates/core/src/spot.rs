//! Spot entities and DTOs.
//!
//! A spot is a physical location (shrine, temple, museum) tracked by a
//! user. Spots own an ordered gallery of [`SpotImage`]s, of which at most
//! one may be flagged as the primary image.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gallery::GalleryImage;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Spot
// ---------------------------------------------------------------------------

/// Kind of location a spot represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotType {
    Shrine,
    Temple,
    Museum,
    Other,
}

impl SpotType {
    /// Stable wire name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            SpotType::Shrine => "shrine",
            SpotType::Temple => "temple",
            SpotType::Museum => "museum",
            SpotType::Other => "other",
        }
    }
}

impl std::fmt::Display for SpotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shrine" => Ok(SpotType::Shrine),
            "temple" => Ok(SpotType::Temple),
            "museum" => Ok(SpotType::Museum),
            "other" => Ok(SpotType::Other),
            other => Err(format!("unknown spot type '{other}'")),
        }
    }
}

/// A spot as returned by the backend service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub id: EntityId,
    pub user_id: EntityId,
    pub slug: String,
    pub name: String,
    pub spot_type: SpotType,
    pub prefecture: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a new spot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSpot {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub spot_type: SpotType,
    #[validate(length(min = 1, max = 100))]
    pub prefecture: String,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub website_url: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}

/// Payload for partially updating an existing spot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSpot {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub spot_type: Option<SpotType>,
    #[validate(length(min = 1, max = 100))]
    pub prefecture: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub website_url: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}

// ---------------------------------------------------------------------------
// SpotImage
// ---------------------------------------------------------------------------

/// Metadata category of a spot image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotImageType {
    Exterior,
    Interior,
    Map,
    Other,
}

/// One image in a spot's gallery.
///
/// `display_order` is dense (`0..N-1`) after any committed reorder, and at
/// most one image per spot carries `is_primary == true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotImage {
    pub id: EntityId,
    pub image_url: String,
    pub image_type: SpotImageType,
    pub is_primary: bool,
    pub display_order: i32,
}

impl GalleryImage for SpotImage {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn clear_primary(&mut self) {
        self.is_primary = false;
    }
}

/// Editable metadata for a spot image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotImageUpdate {
    pub image_url: Option<String>,
    pub image_type: Option<SpotImageType>,
    pub is_primary: Option<bool>,
}

/// Upload slot returned when a new image upload is initiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadSlot {
    pub image_id: EntityId,
    pub upload_url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
