//! Student-facing records: the student list, homework, grades and absences.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dates::sort_newest_first;
use crate::ids::RecordId;
use crate::serde::deserialize_lenient_string;

/// A student as returned by `/student/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    #[serde(rename = "OgrenciId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        rename = "AdSoyad",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(
        rename = "OgrenciNumara",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_number: Option<String>,
    #[serde(
        rename = "Sinif",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,
    #[serde(
        rename = "Fotograf",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    #[serde(
        rename = "AnneTel",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mother_phone: Option<String>,
    #[serde(
        rename = "BabaTel",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub father_phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Homework assigned to a student (`/student/homework`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentHomework {
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
        rename = "Aciklama",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Date the homework was given.
    #[serde(
        rename = "tarih",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub given_at: Option<String>,
    #[serde(
        rename = "TeslimTarihi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_at: Option<String>,
    #[serde(
        rename = "durum",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An exam score (`/student/point`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grade {
    #[serde(
        rename = "Ders",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lesson: Option<String>,
    #[serde(
        rename = "SinavAdi",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub exam_name: Option<String>,
    #[serde(
        rename = "puan",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<String>,
    #[serde(
        rename = "Tarih",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recorded absence (`/student/attendance`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Absence {
    #[serde(
        rename = "tarih",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        rename = "durum",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Orders homework by the date it was given, newest first.
pub fn sort_homework(items: &mut [StudentHomework]) {
    sort_newest_first(items, |h| h.given_at.as_deref());
}

/// Orders absences newest first.
pub fn sort_absences(items: &mut [Absence]) {
    sort_newest_first(items, |a| a.date.as_deref());
}
