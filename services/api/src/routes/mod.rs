pub mod admin;
pub mod appointments;
pub mod auth;
pub mod health;
pub mod payments;
pub mod pets;
pub mod slots;
