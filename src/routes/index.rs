use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use askama::Template;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{CityForm, WeatherResult};
use crate::services::{ProviderError, WeatherClient};
use crate::views::{ErrorTemplate, IndexTemplate};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherClient>,
}

impl AppState {
    pub fn new(weather: WeatherClient) -> Self {
        Self {
            weather: Arc::new(weather),
        }
    }
}

/// Failures that end a request with an error page instead of the form
///
/// A rejected lookup is not one of them; it renders the form with the
/// "City not found" message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    #[error("Weather provider request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Weather provider returned an unusable payload: {0}")]
    MalformedPayload(String),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl From<ProviderError> for LookupError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RequestError(e) => LookupError::Transport(e),
            ProviderError::InvalidResponse(msg) => LookupError::MalformedPayload(msg),
        }
    }
}

impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingField(_) | LookupError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Rejected request: {}", self);
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = ErrorTemplate {
            status: status.as_u16(),
            reason,
        }
        .render()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to render error page: {}", e);
            format!("{} {}", status.as_u16(), reason)
        });

        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body)
    }
}

/// Handle undecodable form bodies (wrong content type, bad encoding)
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    LookupError::InvalidForm(err.to_string()).into()
}

/// Configure the form route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(show_form))
            .route(web::post().to(lookup_weather)),
    );
}

/// GET /
///
/// Renders the empty form.
async fn show_form() -> Result<HttpResponse, LookupError> {
    render_index(IndexTemplate::awaiting_input())
}

/// POST /
///
/// Form body: `city=<name>`
///
/// Looks up the city with the provider and renders the form together with
/// either the report or the "City not found" message. Each request is
/// independent: one provider call, no state kept.
async fn lookup_weather(
    state: web::Data<AppState>,
    form: web::Form<CityForm>,
) -> Result<HttpResponse, LookupError> {
    let city = form
        .into_inner()
        .city
        .ok_or(LookupError::MissingField("city"))?;

    tracing::info!("Looking up weather for city: {:?}", city);

    let result = state.weather.current_weather(&city).await?;

    if let WeatherResult::Report(report) = &result {
        tracing::debug!("Rendering weather for {}", report.name);
    }

    render_index(IndexTemplate::with_result(result, city))
}

fn render_index(page: IndexTemplate) -> Result<HttpResponse, LookupError> {
    let html = page.render()?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
