pub mod auth;
pub mod export;
pub mod goshuin;
pub mod goshuin_images;
pub mod health;
pub mod prefectures;
pub mod search;
pub mod spot_images;
pub mod spots;

use validator::Validate;

use goshuin_core::error::CoreError;

use crate::error::AppResult;

/// Run `validator` field checks on a payload, mapping failures to a 400
/// validation error.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|err| CoreError::Validation(err.to_string()).into())
}
