//! Goshuin record entities and DTOs.
//!
//! A goshuin record documents one collected (or planned) stamp at a spot:
//! visit date, how it was obtained, status, an optional 1-5 rating, and
//! free-form markdown notes. Records own an ordered image gallery without
//! a primary flag.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::gallery::GalleryImage;
use crate::types::{EntityId, Timestamp, VisitDate};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Collection status of a goshuin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoshuinStatus {
    Planned,
    Collected,
    Missed,
}

/// How a goshuin was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    InPerson,
    ByMail,
    Event,
    Online,
}

/// Metadata category of a goshuin image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoshuinImageType {
    StampFront,
    StampBack,
    Cover,
    Other,
}

// ---------------------------------------------------------------------------
// GoshuinRecord
// ---------------------------------------------------------------------------

/// A goshuin record as returned by the backend service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoshuinRecord {
    pub id: EntityId,
    pub user_id: EntityId,
    pub spot_id: EntityId,
    pub visit_date: VisitDate,
    pub acquisition_method: AcquisitionMethod,
    pub status: GoshuinStatus,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a goshuin record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoshuin {
    pub visit_date: VisitDate,
    pub acquisition_method: AcquisitionMethod,
    pub status: GoshuinStatus,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

impl CreateGoshuin {
    /// Full payload validation: field constraints plus the visit-date rule
    /// (a visit cannot be dated in the future).
    pub fn validate_payload(&self, today: VisitDate) -> Result<(), CoreError> {
        self.validate()
            .map_err(|err| CoreError::Validation(err.to_string()))?;
        validate_visit_date(self.visit_date, today)
    }
}

/// Payload for partially updating a goshuin record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateGoshuin {
    pub visit_date: Option<VisitDate>,
    pub acquisition_method: Option<AcquisitionMethod>,
    pub status: Option<GoshuinStatus>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

impl UpdateGoshuin {
    /// Full payload validation. The visit-date rule only applies when the
    /// field is present.
    pub fn validate_payload(&self, today: VisitDate) -> Result<(), CoreError> {
        self.validate()
            .map_err(|err| CoreError::Validation(err.to_string()))?;
        match self.visit_date {
            Some(date) => validate_visit_date(date, today),
            None => Ok(()),
        }
    }
}

fn validate_visit_date(date: VisitDate, today: VisitDate) -> Result<(), CoreError> {
    if date > today {
        return Err(CoreError::Validation(
            "visit_date cannot be in the future".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GoshuinImage
// ---------------------------------------------------------------------------

/// One image in a goshuin record's gallery.
///
/// Unlike spot images there is no primary flag; `display_order` is dense
/// (`0..N-1`) after any committed reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoshuinImage {
    pub id: EntityId,
    pub image_url: String,
    pub image_type: GoshuinImageType,
    pub display_order: i32,
}

impl GalleryImage for GoshuinImage {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }
}

/// Editable metadata for a goshuin image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoshuinImageUpdate {
    pub image_url: Option<String>,
    pub image_type: Option<GoshuinImageType>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
