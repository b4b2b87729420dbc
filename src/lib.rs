//! # Okulpanel
//!
//! Client for the Okulpanel school-management platform.
//!
//! ## Overview
//!
//! The library keeps a signed-in session across restarts and talks to the
//! platform's REST API on behalf of admins, teachers, parents and students:
//!
//! - **Token storage**: credentials, role, user record, school code and theme
//!   preference live in a local secure store
//! - **Authenticated requests**: the access token is attached to every call;
//!   an expired token is refreshed once and the request replayed
//! - **Forced logout**: when a token cannot be refreshed the session is
//!   cleared
//! - **Feature services**: typed access to students, teachers, homework,
//!   grades, absences, exams, schedules and attendance
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── okulpanel-config/   # Environment configuration (API URLs, storage, logging)
//! ├── okulpanel-models/   # Domain records and DTOs
//! ├── okulpanel-storage/  # Secure storage backends and the token store
//! └── okulpanel-client/   # HTTP client with token refresh
//! src/
//! ├── app.rs              # Application root wiring
//! ├── session.rs          # Session context
//! ├── theme.rs            # Theme context
//! ├── modules/            # Feature services
//! │   ├── auth/           # Login and logout
//! │   ├── users/          # The signed-in user's record
//! │   ├── students/       # Students, homework, grades, absences
//! │   ├── teachers/       # Teachers, exams, attendance
//! │   └── schedule/       # Lesson schedules and gains
//! └── main.rs             # `okulpanel` command-line client
//! ```
//!
//! ## Session Lifecycle
//!
//! ```text
//! loading ──restore()──► unauthenticated ──login──► authenticated
//!                              ▲                          │
//!                              └── logout / token rejected ┘
//! ```
//!
//! A session is authenticated only while both an access token and a role
//! are stored. A school code picked before login is kept while signed out.
//!
//! ## Quick Start
//!
//! ```bash
//! OKULPANEL_API_URL=https://ahuiho.okulpanel.com/api
//! OKULPANEL_UPLOAD_URL=https://ahuiho.okulpanel.com/uploads
//! OKULPANEL_DATA_DIR=.okulpanel
//! ```
//!
//! ```bash
//! okulpanel school AHUIHO
//! okulpanel login -u veli@example.com
//! okulpanel homework
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application root
//! - [`logging`]: Tracing setup
//! - [`modules`]: Feature services
//! - [`session`]: Session context
//! - [`theme`]: Theme context
//! - [`utils`]: Error types
//! - [`validator`]: Validation message formatting

pub mod app;
pub mod logging;
pub mod modules;
pub mod session;
pub mod theme;
pub mod utils;
pub mod validator;

pub use app::App;
pub use session::SessionContext;
pub use theme::ThemeContext;

// Re-export workspace crates for convenience
pub use okulpanel_client;
pub use okulpanel_config;
pub use okulpanel_models;
pub use okulpanel_storage;
