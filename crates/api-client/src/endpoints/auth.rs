use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse, User};

/// Auth service endpoints. Login and signup never carry a bearer token.
pub struct AuthApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// `POST {auth}/login`. Does not touch the session store; see
    /// [`SessionManager::login`](crate::SessionManager::login).
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let descriptor = RequestDescriptor::post(self.client.auth_url("login")?)
            .json(request)?
            .unauthenticated();
        self.client.send_json(descriptor).await
    }

    /// `POST {auth}/signup`.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse> {
        let descriptor = RequestDescriptor::post(self.client.auth_url("signup")?)
            .json(request)?
            .unauthenticated();
        self.client.send_json(descriptor).await
    }

    /// `GET {auth}/users/me` with the current access token.
    pub async fn me(&self) -> ApiResult<User> {
        let descriptor = RequestDescriptor::get(self.client.auth_url("users/me")?);
        self.client.send_json(descriptor).await
    }
}
