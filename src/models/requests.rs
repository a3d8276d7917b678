use serde::Deserialize;

/// Form submitted to `POST /`
///
/// A missing `city` is reported by the handler as `LookupError::MissingField`.
#[derive(Debug, Deserialize)]
pub struct CityForm {
    pub city: Option<String>,
}
