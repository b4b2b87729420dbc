//! Teacher-facing records and request bodies.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::ids::RecordId;
use crate::serde::deserialize_lenient_string;

/// A teacher as returned by `/teacher/allteacher`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    #[serde(rename = "OgretmenID", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        rename = "AdSoyad",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(
        rename = "Fotograf",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A scheduled exam (`/teacher/examget`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        rename = "SinavAdi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "DersAdi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lesson: Option<String>,
    #[serde(
        rename = "SinifAdi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,
    #[serde(
        rename = "Tarih",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        rename = "Saat",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Homework a teacher has given (`/teacher/homework`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherHomework {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        rename = "DersAdi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lesson: Option<String>,
    #[serde(
        rename = "Konu",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<String>,
    #[serde(
        rename = "Sinif",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,
    #[serde(
        rename = "TeslimTarihi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One student row of a lesson's attendance sheet (`/teacher/attendance`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceRow {
    #[serde(rename = "OgrenciId", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<RecordId>,
    #[serde(
        rename = "AdSoyad",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(
        rename = "durum",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identifies one lesson slot whose attendance sheet is listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceQuery {
    #[serde(rename = "Sinif")]
    pub class_name: String,
    /// Lesson date, `YYYY-MM-DD`.
    #[serde(rename = "Tarih")]
    pub date: String,
    #[serde(rename = "DersSaati")]
    pub lesson_hour: String,
    #[serde(rename = "ProgramID")]
    pub program_id: i64,
}

/// Attendance status codes understood by `/teacher/attendanceadd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Absent,
    Present,
    Late,
}

impl AttendanceStatus {
    pub fn code(&self) -> u8 {
        match self {
            AttendanceStatus::Absent => 0,
            AttendanceStatus::Present => 1,
            AttendanceStatus::Late => 2,
        }
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "absent" => Ok(AttendanceStatus::Absent),
            "1" | "present" => Ok(AttendanceStatus::Present),
            "2" | "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("unknown attendance status: {}", other)),
        }
    }
}

/// Marks one student for one lesson slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceMark {
    #[serde(rename = "tarih")]
    pub date: String,
    #[serde(rename = "OgrenciID")]
    pub student_id: i64,
    #[serde(rename = "ProgramID")]
    pub program_id: i64,
    #[serde(rename = "durum")]
    pub status: AttendanceStatus,
}

/// A grade a teacher records for one student's exam (`/teacher/point/add`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeEntry {
    #[serde(rename = "puan")]
    pub score: String,
    #[serde(rename = "OgrenciId")]
    pub student_id: RecordId,
    #[serde(rename = "SinavId")]
    pub exam_id: RecordId,
}
