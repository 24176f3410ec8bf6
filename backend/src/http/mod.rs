pub mod health;
pub mod hotel_handler;
