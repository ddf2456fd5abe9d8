//! Login, OTP and registration calls.
//!
//! These hit the exempt auth endpoints, so they never carry a token and a
//! 401 here means bad credentials rather than an expired session.

use tracing::{info, warn};

use crate::models::{
    AuthResponse, LoginRequest, OtpRequest, OtpSent, RegisterCompleteRequest, VerifyOtpRequest,
};

use super::{ApiClient, ApiError};

const LOGIN_PATH: &str = "/auth/login";
const REQUEST_OTP_PATH: &str = "/auth/request-otp";
const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
const REGISTER_COMPLETE_PATH: &str = "/auth/register-complete";

impl ApiClient {
    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post(LOGIN_PATH, &body).await?;
        self.establish_session(&auth).await?;
        Ok(auth)
    }

    /// Ask the server to email a one-time code
    pub async fn request_otp(&self, email: &str) -> Result<OtpSent, ApiError> {
        let body = OtpRequest {
            email: email.to_string(),
        };
        self.post(REQUEST_OTP_PATH, &body).await
    }

    /// Exchange a one-time code for a session
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse, ApiError> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        let auth: AuthResponse = self.post(VERIFY_OTP_PATH, &body).await?;
        self.establish_session(&auth).await?;
        Ok(auth)
    }

    /// Finish a registration started with `request_otp`
    pub async fn complete_registration(
        &self,
        request: &RegisterCompleteRequest,
    ) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self.post(REGISTER_COMPLETE_PATH, request).await?;
        self.establish_session(&auth).await?;
        Ok(auth)
    }

    /// Persist the new token and re-arm both session latches.
    async fn establish_session(&self, auth: &AuthResponse) -> Result<(), ApiError> {
        self.credentials().store(&auth.token).await?;
        self.reset_session_expiry_flag();
        self.reset_server_error_flag();
        info!(user_id = auth.user.id, "Session established");
        Ok(())
    }

    /// Explicit user logout: drop the token and tell the app.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.credentials().remove().await?;
        if let Err(e) = self.hooks().notifier.notify().await {
            warn!(error = %e, "Logout notifier failed");
        }
        info!("Logged out");
        Ok(())
    }
}
