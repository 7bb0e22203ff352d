use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    dtos::favoritedtos::{
        FavoriteCheckData, FavoriteCheckResponseDto, FavoriteListResponseDto, FavoriteResponseDto,
    },
    error::HttpError,
    middleware::{auth, AuthenticatedUser},
    AppState,
};

pub fn favorite_handler() -> Router {
    // All routes require authentication
    Router::new()
        .route("/", get(get_user_favorites))
        .route("/check/:code", get(check_favorite_status))
        .route(
            "/:code",
            post(add_to_favorites).delete(remove_from_favorites),
        )
        .layer(middleware::from_fn(auth))
}

pub async fn add_to_favorites(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let favorite = app_state.favorite_service.add(&user.user, &code).await?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponseDto {
            success: true,
            data: favorite,
        }),
    ))
}

pub async fn remove_from_favorites(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.favorite_service.remove(&user.user, &code).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {}
    })))
}

pub async fn get_user_favorites(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let favorites = app_state.favorite_service.list(&user.user).await?;

    Ok(Json(FavoriteListResponseDto {
        success: true,
        count: favorites.len(),
        data: favorites,
    }))
}

pub async fn check_favorite_status(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let is_favorite = app_state.favorite_service.check(&user.user, &code).await?;

    Ok(Json(FavoriteCheckResponseDto {
        success: true,
        data: FavoriteCheckData { is_favorite },
    }))
}
