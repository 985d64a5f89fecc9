use web_sys::window;

/// Used when the page location cannot be read
const FALLBACK_BASE_URL: &str = "http://localhost:5000";

/// Get the base HTTP URL the widget was served from (e.g., "http://localhost:5000")
pub fn get_base_url() -> String {
    let Some(window) = window() else {
        return FALLBACK_BASE_URL.to_string();
    };
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:5000".to_string());

    format!("{}//{}", protocol, host)
}
