//! Spot and spot-image endpoints.

use reqwest::Method;
use serde_json::json;

use goshuin_core::pagination::Paginated;
use goshuin_core::spot::{
    CreateSpot, ImageUploadSlot, Spot, SpotImage, SpotImageUpdate, SpotType, UpdateSpot,
};
use goshuin_core::EntityId;

use crate::client::BackendClient;
use crate::error::BackendError;

/// Query parameters for the paginated spot list.
#[derive(Debug, Clone, Default)]
pub struct SpotListQuery {
    pub page: i64,
    pub size: i64,
    pub prefecture: Option<String>,
    pub category: Option<SpotType>,
    pub keyword: Option<String>,
}

impl SpotListQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];
        if let Some(prefecture) = &self.prefecture {
            pairs.push(("prefecture", prefecture.clone()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        pairs
    }
}

impl BackendClient {
    // ---- spots ----

    /// List the user's spots with optional prefecture / category / keyword
    /// filters.
    pub async fn list_spots(
        &self,
        token: &str,
        query: &SpotListQuery,
    ) -> Result<Paginated<Spot>, BackendError> {
        let request = self
            .authed(Method::GET, "/api/spots/", token)
            .query(&query.to_pairs());
        self.send_json(request).await
    }

    pub async fn create_spot(
        &self,
        token: &str,
        input: &CreateSpot,
    ) -> Result<Spot, BackendError> {
        let request = self.authed(Method::POST, "/api/spots/", token).json(input);
        self.send_json(request).await
    }

    pub async fn get_spot(&self, token: &str, spot_id: EntityId) -> Result<Spot, BackendError> {
        let request = self.authed(Method::GET, &format!("/api/spots/{spot_id}"), token);
        self.send_json(request).await
    }

    pub async fn update_spot(
        &self,
        token: &str,
        spot_id: EntityId,
        input: &UpdateSpot,
    ) -> Result<Spot, BackendError> {
        let request = self
            .authed(Method::PATCH, &format!("/api/spots/{spot_id}"), token)
            .json(input);
        self.send_json(request).await
    }

    pub async fn delete_spot(&self, token: &str, spot_id: EntityId) -> Result<(), BackendError> {
        let request = self.authed(Method::DELETE, &format!("/api/spots/{spot_id}"), token);
        self.send_no_content(request).await
    }

    // ---- spot images ----

    /// List a spot's gallery in display order.
    pub async fn list_spot_images(
        &self,
        token: &str,
        spot_id: EntityId,
    ) -> Result<Vec<SpotImage>, BackendError> {
        let request = self.authed(Method::GET, &format!("/api/spots/{spot_id}/images"), token);
        self.send_json(request).await
    }

    /// Initiate an image upload; the backend allocates the image record
    /// and returns the upload slot.
    pub async fn create_spot_image_upload(
        &self,
        token: &str,
        spot_id: EntityId,
    ) -> Result<ImageUploadSlot, BackendError> {
        let request = self.authed(
            Method::POST,
            &format!("/api/spots/{spot_id}/images/uploads"),
            token,
        );
        self.send_json(request).await
    }

    pub async fn update_spot_image(
        &self,
        token: &str,
        spot_id: EntityId,
        image_id: EntityId,
        input: &SpotImageUpdate,
    ) -> Result<SpotImage, BackendError> {
        let request = self
            .authed(
                Method::PATCH,
                &format!("/api/spots/{spot_id}/images/{image_id}"),
                token,
            )
            .json(input);
        self.send_json(request).await
    }

    pub async fn delete_spot_image(
        &self,
        token: &str,
        spot_id: EntityId,
        image_id: EntityId,
    ) -> Result<(), BackendError> {
        let request = self.authed(
            Method::DELETE,
            &format!("/api/spots/{spot_id}/images/{image_id}"),
            token,
        );
        self.send_no_content(request).await
    }

    /// Submit a full ordered id list; the backend responds with the
    /// canonical reordered gallery.
    pub async fn reorder_spot_images(
        &self,
        token: &str,
        spot_id: EntityId,
        image_ids: &[EntityId],
    ) -> Result<Vec<SpotImage>, BackendError> {
        let request = self
            .authed(
                Method::POST,
                &format!("/api/spots/{spot_id}/images/reorder"),
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
    fn list_query_includes_only_set_filters() {
        let query = SpotListQuery {
            page: 2,
            size: 12,
            prefecture: Some("京都府".into()),
            category: None,
            keyword: Some("inari".into()),
        };
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "2".to_string()),
                ("size", "12".to_string()),
                ("prefecture", "京都府".to_string()),
                ("keyword", "inari".to_string()),
            ]
        );
    }

    #[test]
    fn category_filter_uses_wire_name() {
        let query = SpotListQuery {
            page: 1,
            size: 12,
            category: Some(SpotType::Temple),
            ..SpotListQuery::default()
        };
        assert!(query
            .to_pairs()
            .contains(&("category", "temple".to_string())));
    }
}
