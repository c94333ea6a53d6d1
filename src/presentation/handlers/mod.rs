mod health;
mod relay;
mod stream;

pub use health::health_handler;
pub use relay::{RelayRequest, RelayResponse, preflight_handler, relay_handler};
pub use stream::stream_handler;
