// Start of file: /src/core/mod.rs

/*
* Server bootstrap: logging setup, router assembly, listener and shutdown handling.
*/

pub mod logging;
pub mod server;

// End of file: /src/core/mod.rs
