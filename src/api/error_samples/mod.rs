/*
* Sample endpoints that fail in every way the global error handler knows about.
* Used to exercise the error envelope end to end.
*/

pub mod handler;
pub mod routes;

pub use routes::error_sample_routes;
