use okulpanel_client::{ApiClient, ApiError};
use okulpanel_models::students::{sort_absences, sort_homework};
use okulpanel_models::{Absence, Exam, Grade, RecordId, Student, StudentHomework};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::modules::UserService;
use crate::modules::records;
use crate::utils::errors::ServiceError;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(api))]
    pub async fn all(api: &ApiClient) -> Result<Vec<Student>, ApiError> {
        let value: Value = api.post("/student/all", &json!({})).await?;
        let students: Vec<Student> = records("/student/all", value)?;
        debug!(count = students.len(), "Students fetched");
        Ok(students)
    }

    /// Homework of a student's class, newest first.
    #[instrument(skip(api))]
    pub async fn homework(
        api: &ApiClient,
        student_id: &RecordId,
        class_name: &str,
    ) -> Result<Vec<StudentHomework>, ApiError> {
        let body = json!({ "OgrenciID": student_id, "Sinif": class_name });
        let value: Value = api.post("/student/homework", &body).await?;
        let mut homework: Vec<StudentHomework> = records("/student/homework", value)?;
        sort_homework(&mut homework);
        Ok(homework)
    }

    /// Recorded absences, newest first.
    #[instrument(skip(api))]
    pub async fn absences(api: &ApiClient, student_id: &RecordId) -> Result<Vec<Absence>, ApiError> {
        let body = json!({ "OgrenciID": student_id });
        let value: Value = api.post("/student/attendance", &body).await?;
        let mut absences: Vec<Absence> = records("/student/attendance", value)?;
        sort_absences(&mut absences);
        Ok(absences)
    }

    #[instrument(skip(api))]
    pub async fn grades(api: &ApiClient, student_id: &RecordId) -> Result<Vec<Grade>, ApiError> {
        let body = json!({ "OgrenciId": student_id });
        let value: Value = api.post("/student/point", &body).await?;
        records("/student/point", value)
    }

    /// Exams scheduled for a class.
    #[instrument(skip(api))]
    pub async fn exams(api: &ApiClient, class_name: &str) -> Result<Vec<Exam>, ApiError> {
        let value: Value = api
            .post("/student/exam", &json!({ "Sinif": class_name }))
            .await?;
        records("/student/exam", value)
    }

    /// Every class of the school, as the server describes them.
    #[instrument(skip(api))]
    pub async fn classes(api: &ApiClient) -> Result<Vec<Value>, ApiError> {
        let value: Value = api.post("/student/classall", &json!({})).await?;
        records("/student/classall", value)
    }

    pub async fn homework_for_current_user(
        api: &ApiClient,
    ) -> Result<Vec<StudentHomework>, ServiceError> {
        let (info, student_id) = UserService::require(api, "OgrenciId", |u| u.student_id()).await?;
        let class_name = info
            .class_name()
            .ok_or(ServiceError::MissingIdentity { field: "Sinif" })?;
        Ok(Self::homework(api, &student_id, &class_name).await?)
    }

    pub async fn absences_for_current_user(api: &ApiClient) -> Result<Vec<Absence>, ServiceError> {
        let (_, student_id) = UserService::require(api, "OgrenciId", |u| u.student_id()).await?;
        Ok(Self::absences(api, &student_id).await?)
    }

    pub async fn grades_for_current_user(api: &ApiClient) -> Result<Vec<Grade>, ServiceError> {
        let (_, student_id) = UserService::require(api, "OgrenciId", |u| u.student_id()).await?;
        Ok(Self::grades(api, &student_id).await?)
    }

    pub async fn exams_for_current_user(api: &ApiClient) -> Result<Vec<Exam>, ServiceError> {
        let (_, class_name) = UserService::require(api, "Sinif", |u| u.class_name()).await?;
        Ok(Self::exams(api, &class_name).await?)
    }
}
