use okulpanel_client::{ApiClient, ApiError};
use okulpanel_models::UserInfo;
use serde_json::{Value, json};
use tracing::instrument;

use crate::utils::errors::ServiceError;

pub const INFO_PATH: &str = "/user/info";

pub struct UserService;

impl UserService {
    /// The signed-in user's record. A non-object body reads as an empty record.
    #[instrument(skip(api))]
    pub async fn info(api: &ApiClient) -> Result<UserInfo, ApiError> {
        let value: Value = api.post(INFO_PATH, &json!({})).await?;
        Ok(UserInfo::from_value(value).unwrap_or_default())
    }

    /// Fetches the user record and reads one identifier from it.
    pub(crate) async fn require<T>(
        api: &ApiClient,
        field: &'static str,
        read: impl FnOnce(&UserInfo) -> Option<T>,
    ) -> Result<(UserInfo, T), ServiceError> {
        let info = Self::info(api).await?;
        match read(&info) {
            Some(value) => Ok((info, value)),
            None => Err(ServiceError::MissingIdentity { field }),
        }
    }
}
