use super::{EntitlementRepository, HotelRepository, SessionRepository};
use crate::models::{HotelEntity, HotelWithRooms, RoomEntity, TicketStatus};
use async_trait::async_trait;

#[derive(Debug, Clone)]
struct TicketRecord {
    user_id: i32,
    status: TicketStatus,
    includes_hotel: bool,
}

/// In-memory stand-in for the Postgres repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tickets: Vec<TicketRecord>,
    hotels: Vec<HotelEntity>,
    rooms: Vec<RoomEntity>,
    sessions: Vec<String>,
    failing: bool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enrollment for `user_id` holding one ticket.
    pub fn with_ticket(mut self, user_id: i32, status: TicketStatus, includes_hotel: bool) -> Self {
        self.tickets.push(TicketRecord {
            user_id,
            status,
            includes_hotel,
        });
        self
    }

    pub fn with_hotel(mut self, hotel: HotelEntity) -> Self {
        self.hotels.push(hotel);
        self
    }

    pub fn with_room(mut self, room: RoomEntity) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.sessions.push(token.into());
        self
    }

    /// Every query fails as if the database were unreachable.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryRepository {
    async fn has_hotel_entitlement(&self, user_id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self.tickets.iter().any(|t| {
            t.user_id == user_id && t.status == TicketStatus::Paid && t.includes_hotel
        }))
    }
}

#[async_trait]
impl HotelRepository for InMemoryRepository {
    async fn find_all_with_rooms(&self) -> Result<Vec<HotelWithRooms>, sqlx::Error> {
        self.check()?;
        let mut hotels = self.hotels.clone();
        hotels.sort_by_key(|h| h.id);
        let mut rooms = self.rooms.clone();
        rooms.sort_by_key(|r| r.id);
        Ok(HotelWithRooms::group(hotels, rooms))
    }

    async fn find_by_id_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        Ok(self
            .find_all_with_rooms()
            .await?
            .into_iter()
            .find(|h| h.hotel.id == hotel_id))
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn session_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self.sessions.iter().any(|s| s == token))
    }
}
