// Route exports
pub mod index;

use actix_web::web;

pub use index::{handle_form_payload_error, AppState, LookupError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(index::configure);
}

/// Form extractor config routing decode failures to the HTML error page
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(handle_form_payload_error)
}
