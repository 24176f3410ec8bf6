// Service layer
pub mod hotel_service;

pub use hotel_service::HotelService;
