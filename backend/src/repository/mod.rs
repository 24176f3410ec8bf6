//! Data-access seams. Handlers and services only see these traits; the
//! Postgres implementations live in [`postgres`].

pub mod postgres;

#[cfg(test)]
pub mod memory;

use crate::models::HotelWithRooms;
use async_trait::async_trait;

pub use postgres::{PgEntitlementRepository, PgHotelRepository, PgSessionRepository};

#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// True iff the user owns an enrollment with a paid ticket whose type
    /// includes hotel access.
    async fn has_hotel_entitlement(&self, user_id: i32) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_all_with_rooms(&self) -> Result<Vec<HotelWithRooms>, sqlx::Error>;
    async fn find_by_id_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn session_exists(&self, token: &str) -> Result<bool, sqlx::Error>;
}
