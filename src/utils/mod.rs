pub mod url_validator;

pub use url_validator::{favicon_url, validate_url};
