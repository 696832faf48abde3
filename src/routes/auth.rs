use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::errors::ApiError;
use crate::routes::AppState;

/// The user behind a valid bearer token
///
/// Adding this extractor to a handler makes the route require
/// `Authorization: Bearer <token>`. The older `Token <token>` scheme is
/// accepted too.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("Token "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("Application state is not configured".to_string()))?;

    let token = bearer_token(req).ok_or_else(|| {
        ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
    })?;

    let claims = state.auth.validate_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token on {}: {}", req.path(), e);
        ApiError::from(e)
    })?;

    Ok(AuthenticatedUser {
        id: claims.user_id,
        username: claims.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_prefixes() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
