pub mod rest;
pub mod ws;

pub use rest::{clear_handler, generate_handler, get_state_handler};
pub use ws::websocket_handler;
