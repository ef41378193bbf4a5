use axum::{extract::FromRequestParts, http::request::Parts};

use workouts_types::common::{User, UserRole};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The caller, as asserted by the authentication proxy in front of the API.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn require_role(&self, role: UserRole) -> Result<&User, ApiError> {
        if self.0.role != role {
            return Err(ApiError::Forbidden(format!(
                "user {} must be a {role}",
                self.0.id
            )));
        }
        Ok(&self.0)
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER)?;
        let name = header(parts, USER_NAME_HEADER).unwrap_or(id);
        let role: UserRole = header(parts, USER_ROLE_HEADER)?
            .parse()
            .map_err(|e| ApiError::Unauthorized(format!("{e}")))?;

        let user = User::new(id, name, role).map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        Ok(CurrentUser(user))
    }
}
