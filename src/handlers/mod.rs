pub mod admin;
pub mod auth;
pub mod destinations;
pub mod favorites;
pub mod reservations;
pub mod traveller;
