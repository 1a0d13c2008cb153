mod handlers;
mod pages;
mod params;
mod routes;
mod state;

pub use params::RequestParams;
pub use routes::create_router;
pub use state::AppState;
