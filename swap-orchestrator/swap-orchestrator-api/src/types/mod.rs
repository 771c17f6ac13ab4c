//! API types for the routing service
pub mod price;
pub mod route;
pub mod sources;

// -----------
// | Headers |
// -----------

/// The header carrying the routing service api key
pub const API_KEY_HEADER: &str = "0x-api-key";
/// The header selecting the routing service api version
pub const API_VERSION_HEADER: &str = "0x-version";
/// The api version this crate's types are written against
pub const API_VERSION: &str = "v2";
