use interactions::SiteConfig;

use crate::dom;

/// Inline `<script type="application/json">` block holding overrides.
const CONFIG_ID: &str = "site-config";

/// Site configuration, falling back to the defaults when the override block
/// is absent or invalid.
pub(crate) fn load() -> SiteConfig {
    let text = dom::document()
        .ok()
        .and_then(|document| document.get_element_by_id(CONFIG_ID))
        .and_then(|element| element.text_content());
    let Some(text) = text else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&text) {
        Ok(config) => {
            log::info!("Loaded overrides from #{}", CONFIG_ID);
            config
        }
        Err(e) => {
            log::warn!("Ignoring #{}: {}", CONFIG_ID, e);
            SiteConfig::default()
        }
    }
}
