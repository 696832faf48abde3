use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::select_next;
use crate::errors::ApiError;
use crate::models::{DecisionStatus, DogCategory, DogPatch, NewDog};
use crate::routes::auth::AuthenticatedUser;
use crate::routes::AppState;
use crate::services::StoreError;

/// Configure dog CRUD, decision and browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/dog/")
            .route(web::get().to(list_dogs))
            .route(web::post().to(create_dog)),
    )
    .service(
        web::resource(r"/dog/{pk:-?\d+}/{category:liked|disliked|undecided}/next/")
            .route(web::get().to(next_dog)),
    )
    .service(
        web::resource(r"/dog/{id:\d+}/{status:liked|disliked|undecided}/")
            .route(web::post().to(record_decision))
            .route(web::put().to(record_decision)),
    )
    .service(
        web::resource(r"/dog/{id:\d+}/")
            .route(web::get().to(get_dog))
            .route(web::put().to(update_dog))
            .route(web::patch().to(update_dog))
            .route(web::delete().to(delete_dog)),
    );
}

fn dog_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Dog {} not found", id))
}

fn status_from_path(segment: &str) -> Option<DecisionStatus> {
    match segment {
        "liked" => Some(DecisionStatus::Liked),
        "disliked" => Some(DecisionStatus::Disliked),
        "undecided" => Some(DecisionStatus::Undecided),
        _ => None,
    }
}

/// GET /api/dog/
async fn list_dogs(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let dogs = state.store.list_dogs().await?;
    Ok(HttpResponse::Ok().json(dogs))
}

/// POST /api/dog/
async fn create_dog(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<NewDog>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let dog = state.store.create_dog(req.into_inner()).await?;
    tracing::info!("User {} created dog {} ({})", user.id, dog.id, dog.name);

    Ok(HttpResponse::Created().json(dog))
}

/// GET /api/dog/{id}/
async fn get_dog(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dog = state.store.get_dog(id).await?.ok_or_else(|| dog_not_found(id))?;

    Ok(HttpResponse::Ok().json(dog))
}

/// PUT or PATCH /api/dog/{id}/
///
/// Both methods merge the supplied fields into the stored dog.
async fn update_dog(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    req: web::Json<DogPatch>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let id = path.into_inner();
    let dog = state
        .store
        .update_dog(id, req.into_inner())
        .await?
        .ok_or_else(|| dog_not_found(id))?;

    tracing::info!("User {} updated dog {}", user.id, id);
    Ok(HttpResponse::Ok().json(dog))
}

/// DELETE /api/dog/{id}/
async fn delete_dog(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !state.store.delete_dog(id).await? {
        return Err(dog_not_found(id));
    }

    tracing::info!("User {} deleted dog {}", user.id, id);
    Ok(HttpResponse::NoContent().finish())
}

/// Record the user's decision about a dog
///
/// POST|PUT /api/dog/{id}/liked/
/// POST|PUT /api/dog/{id}/disliked/
/// POST|PUT /api/dog/{id}/undecided/
///
/// Response body:
/// ```json
/// { "dog": 1, "status": "l" }
/// ```
async fn record_decision(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, ApiError> {
    let (dog_id, segment) = path.into_inner();
    let status = status_from_path(&segment).ok_or_else(|| dog_not_found(dog_id))?;

    let decision = state
        .store
        .upsert_decision(user.id, dog_id, status)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => dog_not_found(dog_id),
            other => other.into(),
        })?;

    tracing::info!("User {} marked dog {} as {}", user.id, dog_id, segment);
    Ok(HttpResponse::Ok().json(decision))
}

/// Next dog matching the user's preferences after the cursor
///
/// GET /api/dog/{pk}/{category}/next/
///
/// `pk` is the last dog id the client has seen (`-1` or `0` to start).
/// Returns 404 once the category is exhausted.
async fn next_dog(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, ApiError> {
    let (cursor, segment) = path.into_inner();
    let category = DogCategory::from_path(&segment);

    let preference = state
        .store
        .get_preference(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User preferences not found".to_string()))?;

    let candidates = state.store.candidate_dogs(&preference.preferences).await?;
    let decisions = state.store.decisions_for_user(user.id).await?;

    let result = select_next(candidates, &preference.preferences, &decisions, category, cursor);

    tracing::debug!(
        "User {} browsing {:?} after {}: {} eligible dogs",
        user.id,
        category,
        cursor,
        result.total_candidates
    );

    match result.dog {
        Some(dog) => Ok(HttpResponse::Ok().json(dog)),
        None => Err(ApiError::NotFound(
            "No more dogs match your preferences".to_string(),
        )),
    }
}
