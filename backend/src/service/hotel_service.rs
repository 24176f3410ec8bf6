use crate::api_error::ApiError;
use crate::models::{HotelDetail, HotelSummary};
use crate::repository::{EntitlementRepository, HotelRepository};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NOT_ENTITLED_MESSAGE: &str = "User has no valid enrollment with paid hotel ticket";
pub const HOTEL_NOT_FOUND_MESSAGE: &str = "Hotel not found";

/// Parses a hotel id. Only positive 32-bit integers name a hotel.
pub fn parse_hotel_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!(
            "hotelId must be a positive integer, got '{}'",
            raw
        ))),
    }
}

/// Entitlement gate plus hotel queries. Every public read goes through the gate.
#[derive(Clone)]
pub struct HotelService {
    entitlements: Arc<dyn EntitlementRepository>,
    hotels: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(
        entitlements: Arc<dyn EntitlementRepository>,
        hotels: Arc<dyn HotelRepository>,
    ) -> Self {
        Self {
            entitlements,
            hotels,
        }
    }

    /// Whether the user may view hotel data. A storage fault is an `Err`,
    /// never `Ok(false)`.
    pub async fn check_hotel_entitlement(&self, user_id: i32) -> Result<bool, ApiError> {
        self.entitlements
            .has_hotel_entitlement(user_id)
            .await
            .map_err(|e| {
                error!(user_id = user_id, error = %e, "Entitlement check failed");
                ApiError::DatabaseError(e)
            })
    }

    async fn ensure_entitled(&self, user_id: i32) -> Result<(), ApiError> {
        if self.check_hotel_entitlement(user_id).await? {
            Ok(())
        } else {
            warn!(user_id = user_id, "User is not entitled to hotel access");
            Err(ApiError::not_found(NOT_ENTITLED_MESSAGE))
        }
    }

    /// Lists every hotel with its rooms.
    pub async fn list_hotels(&self, user_id: i32) -> Result<Vec<HotelSummary>, ApiError> {
        self.ensure_entitled(user_id).await?;

        let hotels = self.hotels.find_all_with_rooms().await.map_err(|e| {
            error!(error = %e, "Failed to list hotels");
            ApiError::DatabaseError(e)
        })?;

        info!(user_id = user_id, count = hotels.len(), "Hotels listed");

        Ok(hotels.into_iter().map(HotelSummary::from).collect())
    }

    /// Fetches one hotel with its rooms. `raw_hotel_id` is the unparsed path
    /// segment; it is only validated once the caller has passed the gate, so
    /// unentitled callers always see `NotFound`.
    pub async fn get_hotel_by_id(
        &self,
        user_id: i32,
        raw_hotel_id: &str,
    ) -> Result<HotelDetail, ApiError> {
        self.ensure_entitled(user_id).await?;
        let hotel_id = parse_hotel_id(raw_hotel_id)?;

        let hotel = self
            .hotels
            .find_by_id_with_rooms(hotel_id)
            .await
            .map_err(|e| {
                error!(hotel_id = hotel_id, error = %e, "Failed to fetch hotel");
                ApiError::DatabaseError(e)
            })?
            .ok_or_else(|| ApiError::not_found(HOTEL_NOT_FOUND_MESSAGE))?;

        info!(user_id = user_id, hotel_id = hotel_id, rooms = hotel.rooms.len(), "Hotel fetched");

        Ok(hotel.into())
    }
}
