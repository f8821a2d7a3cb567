// API modules. Each feature exposes a `routes()` builder merged in core::server.

pub mod error_samples;
