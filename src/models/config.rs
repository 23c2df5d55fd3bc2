//! Configuration model loaded from external sources.

use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(length(min = 1))]
    pub database_url: String,
    pub templates_dir: String,
    /// Directory with covers, PDFs and static assets.
    pub static_dir: String,
    /// Directory with the header/footer partials.
    pub partials_dir: String,
    /// Root of the catalog API consumed by the home and detail views.
    #[validate(url)]
    pub api_base_url: String,
}
