pub mod card;
pub mod config;
pub mod context;
pub mod store;
pub mod surface;
pub mod types;
