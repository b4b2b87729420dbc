use async_trait::async_trait;

/// Called when a request fails authentication and the token cannot be
/// refreshed.
///
/// The session layer implements this to clear the stored session. The
/// client awaits the handler before returning the original error.
#[async_trait]
pub trait AuthFailureHandler: Send + Sync {
    async fn on_auth_failure(&self);
}
