pub mod hotel;
pub mod ticket;

pub use hotel::*;
pub use ticket::*;
