//! Goshuin record and goshuin-image endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use goshuin_core::goshuin::{
    CreateGoshuin, GoshuinImage, GoshuinImageUpdate, GoshuinRecord, UpdateGoshuin,
};
use goshuin_core::pagination::Paginated;
use goshuin_core::spot::ImageUploadSlot;
use goshuin_core::EntityId;

use crate::client::BackendClient;
use crate::error::BackendError;

/// Sort direction for the goshuin list (by visit date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for the paginated goshuin list.
#[derive(Debug, Clone, Default)]
pub struct GoshuinListQuery {
    pub page: i64,
    pub size: i64,
    pub sort_order: SortOrder,
    pub spot_id: Option<EntityId>,
}

impl GoshuinListQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ];
        if let Some(spot_id) = self.spot_id {
            pairs.push(("spot_id", spot_id.to_string()));
        }
        pairs
    }
}

impl BackendClient {
    // ---- records ----

    /// List the user's goshuin records, sorted by visit date.
    pub async fn list_goshuin(
        &self,
        token: &str,
        query: &GoshuinListQuery,
    ) -> Result<Paginated<GoshuinRecord>, BackendError> {
        let request = self
            .authed(Method::GET, "/api/goshuin", token)
            .query(&query.to_pairs());
        self.send_json(request).await
    }

    /// Create a goshuin record under a spot.
    pub async fn create_goshuin(
        &self,
        token: &str,
        spot_id: EntityId,
        input: &CreateGoshuin,
    ) -> Result<GoshuinRecord, BackendError> {
        let request = self
            .authed(Method::POST, &format!("/api/spots/{spot_id}/goshuin"), token)
            .json(input);
        self.send_json(request).await
    }

    pub async fn get_goshuin(
        &self,
        token: &str,
        record_id: EntityId,
    ) -> Result<GoshuinRecord, BackendError> {
        let request = self.authed(Method::GET, &format!("/api/goshuin/{record_id}"), token);
        self.send_json(request).await
    }

    pub async fn update_goshuin(
        &self,
        token: &str,
        record_id: EntityId,
        input: &UpdateGoshuin,
    ) -> Result<GoshuinRecord, BackendError> {
        let request = self
            .authed(Method::PATCH, &format!("/api/goshuin/{record_id}"), token)
            .json(input);
        self.send_json(request).await
    }

    pub async fn delete_goshuin(
        &self,
        token: &str,
        record_id: EntityId,
    ) -> Result<(), BackendError> {
        let request = self.authed(Method::DELETE, &format!("/api/goshuin/{record_id}"), token);
        self.send_no_content(request).await
    }

    // ---- goshuin images ----

    /// List a record's gallery in display order.
    pub async fn list_goshuin_images(
        &self,
        token: &str,
        record_id: EntityId,
    ) -> Result<Vec<GoshuinImage>, BackendError> {
        let request = self.authed(
            Method::GET,
            &format!("/api/goshuin/{record_id}/images"),
            token,
        );
        self.send_json(request).await
    }

    /// Initiate an image upload; the backend allocates the image record
    /// and returns the upload slot.
    pub async fn create_goshuin_image_upload(
        &self,
        token: &str,
        record_id: EntityId,
    ) -> Result<ImageUploadSlot, BackendError> {
        let request = self.authed(
            Method::POST,
            &format!("/api/goshuin/{record_id}/images/uploads"),
            token,
        );
        self.send_json(request).await
    }

    pub async fn update_goshuin_image(
        &self,
        token: &str,
        record_id: EntityId,
        image_id: EntityId,
        input: &GoshuinImageUpdate,
    ) -> Result<GoshuinImage, BackendError> {
        let request = self
            .authed(
                Method::PATCH,
                &format!("/api/goshuin/{record_id}/images/{image_id}"),
                token,
            )
            .json(input);
        self.send_json(request).await
    }

    pub async fn delete_goshuin_image(
        &self,
        token: &str,
        record_id: EntityId,
        image_id: EntityId,
    ) -> Result<(), BackendError> {
        let request = self.authed(
            Method::DELETE,
            &format!("/api/goshuin/{record_id}/images/{image_id}"),
            token,
        );
        self.send_no_content(request).await
    }

    /// Submit a full ordered id list; the backend responds with the
    /// canonical reordered gallery.
    pub async fn reorder_goshuin_images(
        &self,
        token: &str,
        record_id: EntityId,
        image_ids: &[EntityId],
    ) -> Result<Vec<GoshuinImage>, BackendError> {
        let request = self
            .authed(
                Method::POST,
                &format!("/api/goshuin/{record_id}/images/reorder"),
                token,
            )
            .json(&json!({ "image_ids": image_ids }));
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_defaults_to_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(
            serde_json::to_string(&SortOrder::Desc).unwrap(),
            "\"desc\""
        );
    }

    #[test]
    fn list_query_includes_spot_filter_when_set() {
        let spot_id = uuid::Uuid::new_v4();
        let query = GoshuinListQuery {
            page: 1,
            size: 12,
            sort_order: SortOrder::Asc,
            spot_id: Some(spot_id),
        };
        let pairs = query.to_pairs();
        assert!(pairs.contains(&("sort_order", "asc".to_string())));
        assert!(pairs.contains(&("spot_id", spot_id.to_string())));
    }
}
