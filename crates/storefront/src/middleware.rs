/// Domain error to HTTP response mapping
pub mod error_handling;
/// Studio resolution for incoming requests
pub mod tenant;
