use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

/// Row of the `"Hotel"` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HotelEntity {
    pub id: i32,
    pub name: String,
    pub image: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: NaiveDateTime,
}

/// Row of the `"Room"` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoomEntity {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    #[sqlx(rename = "hotelId")]
    pub hotel_id: i32,
    #[sqlx(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: NaiveDateTime,
}

/// A hotel together with every room it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelWithRooms {
    pub hotel: HotelEntity,
    pub rooms: Vec<RoomEntity>,
}

impl HotelWithRooms {
    /// Groups `rooms` under their owning hotels, keeping the order of `hotels`.
    /// Rooms whose hotel is not in `hotels` are dropped.
    pub fn group(hotels: Vec<HotelEntity>, rooms: Vec<RoomEntity>) -> Vec<HotelWithRooms> {
        let index: HashMap<i32, usize> = hotels
            .iter()
            .enumerate()
            .map(|(position, hotel)| (hotel.id, position))
            .collect();

        let mut grouped: Vec<HotelWithRooms> = hotels
            .into_iter()
            .map(|hotel| HotelWithRooms {
                hotel,
                rooms: Vec::new(),
            })
            .collect();

        for room in rooms {
            if let Some(&position) = index.get(&room.hotel_id) {
                grouped[position].rooms.push(room);
            }
        }

        grouped
    }
}

/// Hotel as returned by `GET /hotels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "Rooms")]
    pub rooms: Vec<RoomSummary>,
}

/// Hotel as returned by `GET /hotels/{hotelId}`; same shape as the listing entry.
pub type HotelDetail = HotelSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    #[serde(rename = "hotelId")]
    pub hotel_id: i32,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Formats a stored timestamp as ISO-8601 UTC with millisecond precision,
/// e.g. `2024-01-02T03:04:05.000Z`.
pub fn to_iso_string(timestamp: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(timestamp, Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<RoomEntity> for RoomSummary {
    fn from(room: RoomEntity) -> Self {
        Self {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            hotel_id: room.hotel_id,
            created_at: to_iso_string(room.created_at),
            updated_at: to_iso_string(room.updated_at),
        }
    }
}

impl From<HotelWithRooms> for HotelSummary {
    fn from(value: HotelWithRooms) -> Self {
        let HotelWithRooms { hotel, rooms } = value;
        Self {
            id: hotel.id,
            name: hotel.name,
            image: hotel.image,
            created_at: to_iso_string(hotel.created_at),
            updated_at: to_iso_string(hotel.updated_at),
            rooms: rooms.into_iter().map(RoomSummary::from).collect(),
        }
    }
}
