// Start of file: /src/utils/mod.rs

/*
    * HTTP plumbing around the error envelope: the global error handler
    * middleware and request extractors that fail with a RawError.
*/

pub mod error_handler;
pub mod extractors;

// End of file: /src/utils/mod.rs
