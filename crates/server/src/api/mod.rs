pub mod handlers;
pub mod lessons;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
