use okulpanel_client::{ApiClient, ApiError};
use okulpanel_models::{LoginReply, LoginRequest, NewSession, Role};
use serde_json::Value;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::session::SessionContext;
use crate::utils::errors::LoginError;

pub const LOGIN_PATH: &str = "/user/login";

pub struct AuthService;

impl AuthService {
    /// Signs in and stores the resulting session.
    ///
    /// The school code already chosen for the session is kept, also when the
    /// login fails. The user
    /// record is not fetched here; screens load it through
    /// [`UserService::info`](crate::modules::UserService::info).
    #[instrument(skip(api, session, request), fields(username = %request.username))]
    pub async fn login(
        api: &ApiClient,
        session: &SessionContext,
        request: LoginRequest,
    ) -> Result<Role, LoginError> {
        request.validate()?;

        // a rejected login must not go through token refresh or sign-out
        let value: Value = match api.post_once(LOGIN_PATH, &request).await {
            Ok(value) => value,
            Err(ApiError::Status {
                body: Value::Bool(false),
                status,
                ..
            }) => {
                warn!(status = %status.as_u16(), "Login rejected");
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };
        let response = match LoginReply::from_json(value) {
            Ok(LoginReply::Accepted(response)) => response,
            Ok(LoginReply::Rejected) => {
                warn!("Login rejected");
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::MalformedResponse(e.to_string())),
        };

        let token = response
            .token
            .ok_or_else(|| LoginError::MalformedResponse("missing token".into()))?;
        let code = response
            .rol
            .ok_or_else(|| LoginError::MalformedResponse("missing role".into()))?;
        let role = Role::from_login_code(&code);

        let mut new_session = NewSession::new().access_token(token).role(role);
        if let Some(refresh_token) = response.refresh_token {
            new_session = new_session.refresh_token(refresh_token);
        }
        if let Some(school_code) = session.snapshot().school_code {
            new_session = new_session.school_code(school_code);
        }

        session.set_session(new_session).await;
        info!(role = %role, "Logged in");
        Ok(role)
    }

    #[instrument(skip(session))]
    pub async fn logout(session: &SessionContext) {
        session.clear_session().await;
    }
}
