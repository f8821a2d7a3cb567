// Start of file: /src/config/mod.rs

/*
* Runtime configuration: environment variables and the AppState handed to
* handlers and the global error handler.
*/

pub mod environment;
pub mod state;

// End of file: /src/config/mod.rs
