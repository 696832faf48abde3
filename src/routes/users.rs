use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{LoginRequest, PreferenceUpdate, Preferences, RegisterRequest, TokenResponse, UserResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::routes::AppState;

/// Configure user and preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user/").route(web::post().to(register)))
        .service(web::resource("/user/login/").route(web::post().to(login)))
        .service(
            web::resource("/user/preferences/")
                .route(web::get().to(get_preferences))
                .route(web::put().to(update_preferences)),
        );
}

/// Register a user
///
/// POST /api/user/
///
/// The default preference record is created in the same store call, so a
/// registered user always has preferences.
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let password_hash = state.auth.hash_password(&req.password)?;
    let user = state
        .store
        .create_user(&req.username, &password_hash, &Preferences::default())
        .await?;

    tracing::info!("Registered user {} ({})", user.id, user.username);

    Ok(HttpResponse::Created().json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}

/// Obtain a bearer token
///
/// POST /api/user/login/
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let invalid = || ApiError::Validation("Unable to log in with provided credentials.".to_string());

    let Some(user) = state.store.find_user_by_username(&req.username).await? else {
        // Same argon2 cost as a wrong password
        state.auth.verify_without_user(&req.password);
        tracing::info!("Failed login for {}", req.username);
        return Err(invalid());
    };

    if !state.auth.verify_password(&req.password, &user.password_hash) {
        tracing::info!("Failed login for {}", req.username);
        return Err(invalid());
    }

    let token = state.auth.issue_token(&user)?;
    tracing::debug!("Issued token for user {}", user.id);

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// GET /api/user/preferences/
async fn get_preferences(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let preference = state
        .store
        .get_preference(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User preferences not found".to_string()))?;

    Ok(HttpResponse::Ok().json(preference))
}

/// Update age, gender and size preferences
///
/// PUT /api/user/preferences/
///
/// Request body (every field optional, string or list form):
/// ```json
/// {
///   "age": "b,y",
///   "gender": ["f"],
///   "size": "s,m,l"
/// }
/// ```
async fn update_preferences(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<PreferenceUpdate>,
) -> Result<HttpResponse, ApiError> {
    let not_found = || ApiError::NotFound("User preferences not found".to_string());

    let mut current = state
        .store
        .get_preference(user.id)
        .await?
        .ok_or_else(not_found)?;

    req.into_inner()
        .apply_to(&mut current.preferences)
        .map_err(ApiError::Validation)?;

    let updated = state
        .store
        .update_preference(user.id, &current.preferences)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        "Updated preferences for user {}: age={} gender={} size={}",
        user.id,
        updated.preferences.age,
        updated.preferences.gender,
        updated.preferences.size
    );

    Ok(HttpResponse::Ok().json(updated))
}
