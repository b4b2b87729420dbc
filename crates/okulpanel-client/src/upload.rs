//! Photo URLs.

use okulpanel_config::ApiConfig;

/// Public URL of an uploaded photo, or `None` for a blank file name.
pub fn upload_url(config: &ApiConfig, filename: &str) -> Option<String> {
    let filename = filename.trim();
    if filename.is_empty() {
        return None;
    }

    // upload_base_url always ends with a slash
    Some(format!("{}{}", config.upload_base_url, filename))
}
