pub mod booking;
pub mod destination;
pub mod payment;
pub mod reservation;
pub mod user;
pub mod user_favorite;
