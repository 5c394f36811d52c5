/// Booking calendar endpoints
pub mod availability;
/// Quote, booking and lookup endpoints
pub mod booking;
/// Health check endpoints
pub mod health;
/// Cart hold endpoints
pub mod hold;
/// Studio profile endpoint
pub mod studio;
