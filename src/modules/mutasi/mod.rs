pub mod controller;
pub mod query;
pub mod routes;
pub mod schema;

pub use routes::mutasi_routes;
