use okulpanel_client::{ApiClient, ApiError};
use okulpanel_models::schedule::{join_gains, sort_gains};
use okulpanel_models::{DaySchedule, Gain, RecordId, ScheduleEntry, group_by_day};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::modules::UserService;
use crate::modules::records;
use crate::utils::errors::ServiceError;

pub struct ScheduleService;

impl ScheduleService {
    /// Lesson slots of a class.
    #[instrument(skip(api))]
    pub async fn class_schedule(
        api: &ApiClient,
        class_name: &str,
    ) -> Result<Vec<ScheduleEntry>, ApiError> {
        let value: Value = api
            .post("/schedule/get", &json!({ "Sinif": class_name }))
            .await?;
        records("/schedule/get", value)
    }

    /// The class schedule grouped by weekday.
    pub async fn weekly(api: &ApiClient, class_name: &str) -> Result<Vec<DaySchedule>, ApiError> {
        Ok(group_by_day(Self::class_schedule(api, class_name).await?))
    }

    pub async fn weekly_for_current_user(api: &ApiClient) -> Result<Vec<DaySchedule>, ServiceError> {
        let (_, class_name) = UserService::require(api, "Sinif", |u| u.class_name()).await?;
        Ok(Self::weekly(api, &class_name).await?)
    }

    /// Gains available for a lesson and class, in teaching-week order.
    #[instrument(skip(api))]
    pub async fn gains(api: &ApiClient, lesson: &str, class_name: &str) -> Result<Vec<Gain>, ApiError> {
        let body = json!({ "Ders": lesson, "Sinif": class_name });
        let value: Value = api.post("/schedule/gain", &body).await?;
        let mut gains: Vec<Gain> = records("/schedule/gain", value)?;
        sort_gains(&mut gains);
        Ok(gains)
    }

    /// Records the selected gains for a lesson slot as one text.
    #[instrument(skip(api, gains))]
    pub async fn add_gains(
        api: &ApiClient,
        class_name: &str,
        program_id: &RecordId,
        gains: &[Gain],
    ) -> Result<Value, ApiError> {
        let text = join_gains(gains.iter().filter_map(|g| g.text.as_deref()));
        let body = json!({
            "Sinif": class_name,
            "kazanim": text,
            "ProgramID": program_id.as_i64().map(Value::from).unwrap_or_else(|| json!(program_id)),
        });
        let result = api.post("/schedule/gainadd", &body).await?;
        info!(count = gains.len(), "Gains recorded");
        Ok(result)
    }

    /// Lesson names known to the school.
    #[instrument(skip(api))]
    pub async fn subjects(api: &ApiClient) -> Result<Vec<Value>, ApiError> {
        let value: Value = api.post("/schedule/dersler", &json!({})).await?;
        records("/schedule/dersler", value)
    }
}
