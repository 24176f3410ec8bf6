use super::{EntitlementRepository, HotelRepository, SessionRepository};
use crate::db::DbPool;
use crate::models::{HotelEntity, HotelWithRooms, RoomEntity, TicketStatus};
use async_trait::async_trait;
use tracing::debug;

const HOTEL_COLUMNS: &str = r#"id, name, image, "createdAt", "updatedAt""#;
const ROOM_COLUMNS: &str = r#"id, name, capacity, "hotelId", "createdAt", "updatedAt""#;

#[derive(Clone)]
pub struct PgEntitlementRepository {
    pool: DbPool,
}

impl PgEntitlementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementRepository for PgEntitlementRepository {
    async fn has_hotel_entitlement(&self, user_id: i32) -> Result<bool, sqlx::Error> {
        let entitled: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM "Enrollment" e
                JOIN "Ticket" t ON t."enrollmentId" = e.id
                JOIN "TicketType" tt ON tt.id = t."ticketTypeId"
                WHERE e."userId" = $1
                  AND t.status::text = $2
                  AND tt."includesHotel" = TRUE
            )
            "#,
        )
        .bind(user_id)
        .bind(TicketStatus::Paid.to_string())
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = user_id, entitled = entitled, "Hotel entitlement checked");

        Ok(entitled)
    }
}

#[derive(Clone)]
pub struct PgHotelRepository {
    pool: DbPool,
}

impl PgHotelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PgHotelRepository {
    async fn find_all_with_rooms(&self) -> Result<Vec<HotelWithRooms>, sqlx::Error> {
        // One connection for both reads; returned to the pool when `conn` drops.
        let mut conn = self.pool.acquire().await?;

        let hotels: Vec<HotelEntity> = sqlx::query_as(&format!(
            r#"SELECT {} FROM "Hotel" ORDER BY id"#,
            HOTEL_COLUMNS
        ))
        .fetch_all(&mut *conn)
        .await?;

        let rooms: Vec<RoomEntity> = sqlx::query_as(&format!(
            r#"SELECT {} FROM "Room" ORDER BY id"#,
            ROOM_COLUMNS
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(HotelWithRooms::group(hotels, rooms))
    }

    async fn find_by_id_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        let hotel: Option<HotelEntity> = sqlx::query_as(&format!(
            r#"SELECT {} FROM "Hotel" WHERE id = $1"#,
            HOTEL_COLUMNS
        ))
        .bind(hotel_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(hotel) = hotel else {
            return Ok(None);
        };

        let rooms: Vec<RoomEntity> = sqlx::query_as(&format!(
            r#"SELECT {} FROM "Room" WHERE "hotelId" = $1 ORDER BY id"#,
            ROOM_COLUMNS
        ))
        .bind(hotel_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(Some(HotelWithRooms { hotel, rooms }))
    }
}

#[derive(Clone)]
pub struct PgSessionRepository {
    pool: DbPool,
}

impl PgSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn session_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM "Session" WHERE token = $1)"#)
            .bind(token)
            .fetch_one(&self.pool)
            .await
    }
}
