use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use okulpanel::App;
use okulpanel::logging::init_logging;
use okulpanel::modules::teachers::service::DEFAULT_PAGE_LIMIT;
use okulpanel::modules::{
    AuthService, ScheduleService, StudentService, TeacherService, UserService,
};
use okulpanel::utils::errors::{LoginError, ServiceError};
use okulpanel_client::ApiError;
use okulpanel_config::LogConfig;
use okulpanel_models::{LoginRequest, Role, Session, Theme, group_by_day};
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "okulpanel")]
#[command(about = "Okulpanel CLI - school platform client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the school to sign in to
    School {
        /// School code
        code: String,
    },
    /// Sign in to the selected school
    Login {
        /// Username (prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Sign out and forget stored credentials
    Logout,
    /// Show the current session and user record
    Whoami,
    /// List students
    Students,
    /// List teachers
    Teachers {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Homework given (teachers) or assigned (parents and students)
    Homework,
    /// Grades of the signed-in student
    Grades,
    /// Absences of the signed-in student, newest first
    Absences,
    /// Weekly lesson schedule
    Schedule {
        /// Class to show (required for admins)
        #[arg(short = 'c', long = "class")]
        class_name: Option<String>,
    },
    /// Exams given (teachers) or scheduled for the class
    Exams,
    /// Show or change the light/dark preference
    Theme {
        #[arg(value_enum)]
        value: Option<ThemeArg>,
    },
    /// Delete everything in local storage, including the theme
    ClearStorage,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("not signed in")]
    NotSignedIn,

    #[error("a class is required for {0} accounts")]
    ClassRequired(Role),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    fn user_message(&self) -> String {
        match self {
            CliError::Login(e) => e.user_message(),
            CliError::Service(e) => e.user_message(),
            CliError::Api(e) => e.user_message(),
            CliError::NotSignedIn => {
                "Oturum açık değil. Önce `okulpanel login` ile giriş yapın.".to_string()
            }
            CliError::ClassRequired(_) => {
                "Yönetici hesaplarının kendi sınıf programı yoktur. Bir sınıf seçin: `okulpanel schedule --class <sınıf>`."
                    .to_string()
            }
            CliError::Other(e) => format!("{:#}", e),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_logging(&LogConfig::from_env());

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("❌ {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    let app = App::from_env().context("Failed to load configuration")?;
    let session = app.restore().await;

    match command {
        Commands::School { code } => {
            app.session.update_school_code(Some(code.trim())).await;
            println!("✅ School set to {}", code.trim());
        }
        Commands::Login { username, password } => {
            handle_login(&app, username, password).await?;
        }
        Commands::Logout => {
            AuthService::logout(&app.session).await;
            println!("✅ Signed out");
        }
        Commands::Whoami => handle_whoami(&app, &session).await?,
        Commands::Students => {
            require_auth(&session)?;
            print_json(&StudentService::all(&app.api).await?)?;
        }
        Commands::Teachers { page, limit } => {
            require_auth(&session)?;
            print_json(&TeacherService::all(&app.api, page, limit).await?)?;
        }
        Commands::Homework => match require_auth(&session)? {
            Role::Teacher | Role::Admin => {
                print_json(&TeacherService::homework_for_current_user(&app.api).await?)?
            }
            Role::Parent | Role::Student => {
                print_json(&StudentService::homework_for_current_user(&app.api).await?)?
            }
        },
        Commands::Grades => {
            require_auth(&session)?;
            print_json(&StudentService::grades_for_current_user(&app.api).await?)?;
        }
        Commands::Absences => {
            require_auth(&session)?;
            print_json(&StudentService::absences_for_current_user(&app.api).await?)?;
        }
        Commands::Schedule { class_name } => {
            let role = require_auth(&session)?;
            match schedule_source(role, class_name)? {
                ScheduleSource::Class(class_name) => {
                    print_json(&ScheduleService::weekly(&app.api, &class_name).await?)?
                }
                ScheduleSource::OwnLessons => {
                    let entries = TeacherService::schedule_for_current_user(&app.api).await?;
                    print_json(&group_by_day(entries))?;
                }
                ScheduleSource::OwnClass => {
                    print_json(&ScheduleService::weekly_for_current_user(&app.api).await?)?
                }
            }
        }
        Commands::Exams => match require_auth(&session)? {
            Role::Teacher | Role::Admin => {
                print_json(&TeacherService::exams_for_current_user(&app.api).await?)?
            }
            Role::Parent | Role::Student => {
                print_json(&StudentService::exams_for_current_user(&app.api).await?)?
            }
        },
        Commands::Theme { value } => {
            let theme = match value {
                None => app.theme.current(),
                Some(ThemeArg::Toggle) => app.theme.toggle().await,
                Some(ThemeArg::Light) => set_theme(&app, Theme::Light).await,
                Some(ThemeArg::Dark) => set_theme(&app, Theme::Dark).await,
            };
            println!("{}", theme);
        }
        Commands::ClearStorage => {
            app.store.clear_all().await;
            println!("✅ Local storage cleared. Please sign in again.");
        }
    }

    Ok(())
}

async fn handle_login(
    app: &App,
    username: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    if app.session.snapshot().school_code.is_none() {
        eprintln!("ℹ️  No school selected. Run `okulpanel school <code>` first to pick one.");
    }

    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Kullanıcı adı")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Şifre")
            .interact()
            .context("Failed to read password")?,
    };

    let role = AuthService::login(&app.api, &app.session, LoginRequest::new(username, password))
        .await?;

    println!("\n✅ Signed in successfully!");
    println!("   Role: {}", role);
    Ok(())
}

async fn handle_whoami(app: &App, session: &Session) -> Result<(), CliError> {
    if !session.is_authenticated() {
        return print_json(session);
    }

    let user = UserService::info(&app.api).await?;
    let photo_url = user.photo().and_then(|p| app.api.upload_url(p));
    // the request may have signed the session out
    print_json(&json!({
        "session": app.session.snapshot(),
        "user": user,
        "photoUrl": photo_url,
    }))
}

async fn set_theme(app: &App, theme: Theme) -> Theme {
    app.theme.set(theme).await;
    theme
}

#[derive(Debug, PartialEq)]
enum ScheduleSource {
    Class(String),
    /// The teacher's own lessons.
    OwnLessons,
    /// The class on the signed-in student's record.
    OwnClass,
}

/// Admins have no class of their own, so they must name one.
fn schedule_source(role: Role, class_name: Option<String>) -> Result<ScheduleSource, CliError> {
    let class_name = class_name
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    match (class_name, role) {
        (Some(class_name), _) => Ok(ScheduleSource::Class(class_name)),
        (None, Role::Teacher) => Ok(ScheduleSource::OwnLessons),
        (None, Role::Parent | Role::Student) => Ok(ScheduleSource::OwnClass),
        (None, Role::Admin) => Err(CliError::ClassRequired(role)),
    }
}

fn require_auth(session: &Session) -> Result<Role, CliError> {
    match (session.is_authenticated(), session.role) {
        (true, Some(role)) => Ok(role),
        _ => Err(CliError::NotSignedIn),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
