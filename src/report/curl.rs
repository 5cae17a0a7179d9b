use crate::args::HttpMethod;
use crate::runner::RunConfig;

/// Builds a copy-pasteable cURL command equivalent to one configured call.
/// Cosmetic only; the engine never shells out.
#[must_use]
pub fn curl_preview(config: &RunConfig) -> String {
    let mut parts = vec![format!(
        "curl -X {} '{}'",
        config.method.as_str(),
        config.target_url
    )];
    for (key, value) in &config.headers {
        parts.push(format!("-H '{}: {}'", key, value));
    }
    if config.method == HttpMethod::Post && !config.body.trim().is_empty() {
        parts.push(format!("-d '{}'", config.body.trim()));
    }
    parts.join(" ")
}
