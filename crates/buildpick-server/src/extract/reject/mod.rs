//! Extractors that reject with structured error responses.

mod enhanced_json;
mod enhanced_path;
mod enhanced_query;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;

/// Trims an error message for inclusion in a response body.
fn sanitize_error_message(message: &str) -> String {
    // Limit to the first two lines and a bounded length.
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(150)
        .collect()
}
