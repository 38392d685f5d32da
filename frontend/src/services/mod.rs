pub mod api;
pub mod date_utils;
pub mod logging;

pub use api::{api_client, GlooHttp};
pub use logging::Logger;
