// Library exports for starblog-server
// The binary, the migrate tool and the integration tests all build on these

pub mod api;
pub mod config;
pub mod db;
pub mod routes;
pub mod serialize;
pub mod state;

pub use routes::router;
pub use state::AppState;
