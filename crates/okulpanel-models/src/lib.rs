//! # Okulpanel Models
//!
//! Domain models and DTOs for the Okulpanel client.
//!
//! Records returned by the school platform use the server's own field names
//! (`OgrenciId`, `Sinif`, `tarih`, ...). Each record names the fields the
//! client reads and keeps everything else in a flattened `extra` map so no
//! server data is dropped.
//!
//! # Modules
//!
//! - [`auth`]: Login and token refresh DTOs
//! - [`dates`]: Lenient parsing of server dates and newest-first ordering
//! - [`ids`]: Record identifiers that may arrive as numbers or strings
//! - [`roles`]: User roles and login role codes
//! - [`schedule`]: Lesson schedule entries, gains and day grouping
//! - [`session`]: In-memory session state
//! - [`students`]: Students, homework, grades and absences
//! - [`teachers`]: Teachers, exams, given homework and attendance rows
//! - [`theme`]: Light/dark preference
//! - [`users`]: The `/user/info` record

pub mod auth;
pub mod dates;
pub mod ids;
pub mod roles;
pub mod schedule;
pub mod serde;
pub mod session;
pub mod students;
pub mod teachers;
pub mod theme;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginReply, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
pub use ids::RecordId;
pub use roles::{Role, UnknownRole};
pub use schedule::{DaySchedule, Gain, ScheduleEntry, group_by_day, sort_gains};
pub use session::{NewSession, Session, SessionState};
pub use students::{Absence, Grade, Student, StudentHomework};
pub use teachers::{AttendanceMark, AttendanceQuery, AttendanceRow, AttendanceStatus, Exam, GradeEntry, Teacher, TeacherHomework};
pub use theme::Theme;
pub use users::UserInfo;
