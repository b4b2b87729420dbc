use okulpanel_client::{ApiClient, ApiError};
use okulpanel_models::{
    AttendanceMark, AttendanceQuery, AttendanceRow, Exam, GradeEntry, RecordId, ScheduleEntry,
    Teacher, TeacherHomework,
};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::modules::UserService;
use crate::modules::records;
use crate::utils::errors::ServiceError;

/// Page size the teacher list uses when none is given.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(api))]
    pub async fn all(api: &ApiClient, page: u32, limit: u32) -> Result<Vec<Teacher>, ApiError> {
        let body = json!({ "page": page, "limit": limit });
        let value: Value = api.post("/teacher/allteacher", &body).await?;
        records("/teacher/allteacher", value)
    }

    #[instrument(skip(api))]
    pub async fn exams(api: &ApiClient, teacher_id: &RecordId) -> Result<Vec<Exam>, ApiError> {
        let value: Value = api
            .post("/teacher/examget", &json!({ "OgretmenID": teacher_id }))
            .await?;
        records("/teacher/examget", value)
    }

    #[instrument(skip(api))]
    pub async fn delete_exam(api: &ApiClient, exam_id: &RecordId) -> Result<Value, ApiError> {
        let result = api
            .post("/teacher/examdelete", &json!({ "SinavID": exam_id }))
            .await?;
        info!(exam_id = %exam_id, "Exam deleted");
        Ok(result)
    }

    /// Records a student's score for an exam.
    #[instrument(skip(api))]
    pub async fn save_grade(api: &ApiClient, entry: &GradeEntry) -> Result<Value, ApiError> {
        api.post("/teacher/point/add", entry).await
    }

    #[instrument(skip(api))]
    pub async fn homework(
        api: &ApiClient,
        teacher_id: &RecordId,
    ) -> Result<Vec<TeacherHomework>, ApiError> {
        let value: Value = api
            .post("/teacher/homework", &json!({ "OgretmenID": teacher_id }))
            .await?;
        records("/teacher/homework", value)
    }

    #[instrument(skip(api))]
    pub async fn delete_homework(api: &ApiClient, homework_id: &RecordId) -> Result<Value, ApiError> {
        let result = api
            .post("/teacher/homeworkdelete", &json!({ "id": homework_id }))
            .await?;
        info!(homework_id = %homework_id, "Homework deleted");
        Ok(result)
    }

    #[instrument(skip(api))]
    pub async fn schedule(
        api: &ApiClient,
        teacher_id: &RecordId,
    ) -> Result<Vec<ScheduleEntry>, ApiError> {
        let value: Value = api
            .post("/teacher/schedule", &json!({ "id": teacher_id }))
            .await?;
        records("/teacher/schedule", value)
    }

    /// Attendance sheet of one lesson slot.
    #[instrument(skip(api))]
    pub async fn attendance(
        api: &ApiClient,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRow>, ApiError> {
        let value: Value = api.post("/teacher/attendance", query).await?;
        records("/teacher/attendance", value)
    }

    #[instrument(skip(api))]
    pub async fn record_attendance(api: &ApiClient, mark: &AttendanceMark) -> Result<Value, ApiError> {
        api.post("/teacher/attendanceadd", mark).await
    }

    pub async fn exams_for_current_user(api: &ApiClient) -> Result<Vec<Exam>, ServiceError> {
        let (_, teacher_id) = UserService::require(api, "OgretmenID", |u| u.teacher_id()).await?;
        Ok(Self::exams(api, &teacher_id).await?)
    }

    pub async fn homework_for_current_user(
        api: &ApiClient,
    ) -> Result<Vec<TeacherHomework>, ServiceError> {
        let (_, teacher_id) = UserService::require(api, "OgretmenID", |u| u.teacher_id()).await?;
        Ok(Self::homework(api, &teacher_id).await?)
    }

    pub async fn schedule_for_current_user(
        api: &ApiClient,
    ) -> Result<Vec<ScheduleEntry>, ServiceError> {
        let (_, teacher_id) = UserService::require(api, "OgretmenID", |u| u.teacher_id()).await?;
        Ok(Self::schedule(api, &teacher_id).await?)
    }
}
