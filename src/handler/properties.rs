use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::propertydtos::{
        CreatePropertyDto, PropertyListResponseDto, PropertyResponseDto, UpdatePropertyDto,
    },
    error::HttpError,
    middleware::{auth, AuthenticatedUser},
    service::filter,
    AppState,
};

pub fn property_handler() -> Router {
    // Public routes
    Router::new()
        .route("/", get(get_properties))
        .route("/search", get(search_properties))
        .route("/:code", get(get_property_by_code))
        // Protected routes
        .route("/", post(create_property).layer(middleware::from_fn(auth)))
        .route(
            "/:code",
            put(update_property)
                .delete(delete_property)
                .layer(middleware::from_fn(auth)),
        )
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .property_service
        .create(&user.user, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PropertyResponseDto {
            success: true,
            data: property,
            from_cache: None,
        }),
    ))
}

pub async fn get_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (properties, from_cache) = app_state.property_service.list().await?;

    Ok(Json(PropertyListResponseDto {
        success: true,
        count: properties.len(),
        data: properties,
        from_cache,
    }))
}

pub async fn search_properties(
    RawQuery(raw_query): RawQuery,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let raw_query = raw_query.unwrap_or_default();
    let params = filter::decode_params(&raw_query)?;
    let query = filter::build_search_query(&params)?;

    let (properties, from_cache) = app_state.property_service.search(&query).await?;

    Ok(Json(PropertyListResponseDto {
        success: true,
        count: properties.len(),
        data: properties,
        from_cache,
    }))
}

pub async fn get_property_by_code(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (property, from_cache) = app_state.property_service.detail(&code).await?;

    Ok(Json(PropertyResponseDto {
        success: true,
        data: property,
        from_cache: Some(from_cache),
    }))
}

pub async fn update_property(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .property_service
        .update(&user.user, &code, body)
        .await?;

    Ok(Json(PropertyResponseDto {
        success: true,
        data: property,
        from_cache: None,
    }))
}

pub async fn delete_property(
    Path(code): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .property_service
        .delete(&user.user, &code)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {}
    })))
}
