use editor_core::EditorConfig;
use wasm_bindgen::JsCast;

/// Element holding optional TOML overrides:
/// `<script type="application/toml" id="editor-config">...</script>`.
const CONFIG_ELEMENT_ID: &str = "editor-config";

/// Reads editor settings embedded in the host page, falling back to the
/// built-in defaults when absent or invalid.
pub fn load_config() -> EditorConfig {
    let source = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let Some(source) = source else {
        return EditorConfig::default();
    };

    match EditorConfig::from_toml_str(&source) {
        Ok(config) => {
            log::info!("Loaded editor config from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(e) => {
            log::warn!("Ignoring invalid editor config: {}", e);
            EditorConfig::default()
        }
    }
}

/// Marker for host-page `<style>` blocks that belong in exported posters.
const EXPORT_STYLE_SELECTOR: &str = "style[data-poster-export]";

/// `(name, css)` of every host-page stylesheet tagged for export. The name
/// is the element id, or its position when it has none.
pub fn tagged_export_styles() -> Vec<(String, String)> {
    let Some(nodes) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(EXPORT_STYLE_SELECTOR).ok())
    else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i).map(|node| (i, node)))
        .map(|(i, node)| {
            let name = node
                .dyn_ref::<web_sys::Element>()
                .map(|el| el.id())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("page-style-{}", i));
            (name, node.text_content().unwrap_or_default())
        })
        .collect()
}
