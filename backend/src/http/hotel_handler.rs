use crate::api_error::ApiError;
use crate::auth::{AuthMiddleware, ClaimsExt, JwtService};
use crate::service::HotelService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use tracing::info;

/// Application state shared by the hotel routes
pub struct AppState {
    pub hotel_service: Arc<HotelService>,
}

fn authenticated_user(req: &HttpRequest) -> Result<i32, ApiError> {
    req.user_id().ok_or(ApiError::Unauthorized)
}

/// GET /hotels
/// List every hotel with its rooms
pub async fn list_hotels(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    let user_id = authenticated_user(&req)?;

    info!(user_id = user_id, "Received list hotels request");

    let hotels = state.hotel_service.list_hotels(user_id).await?;

    Ok(HttpResponse::Ok().json(hotels))
}

/// GET /hotels/{hotelId}
/// Fetch one hotel with its rooms
pub async fn get_hotel_by_id(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user_id = authenticated_user(&req)?;
    let raw_hotel_id = path.into_inner();

    info!(user_id = user_id, hotel_id = %raw_hotel_id, "Received get hotel request");

    let hotel = state
        .hotel_service
        .get_hotel_by_id(user_id, &raw_hotel_id)
        .await?;

    Ok(HttpResponse::Ok().json(hotel))
}

/// Configure hotel routes behind bearer authentication
pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: JwtService) {
    cfg.service(
        web::scope("/hotels")
            .wrap(AuthMiddleware::new(jwt_service))
            .route("", web::get().to(list_hotels))
            .route("/{hotelId}", web::get().to(get_hotel_by_id)),
    );
}
