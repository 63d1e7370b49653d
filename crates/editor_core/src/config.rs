//! Editor configuration.
//!
//! Every field has a built-in default, so a host may pass a partial TOML
//! document containing only the keys it wants to change:
//!
//! ```toml
//! [canvas]
//! width = 1080
//!
//! [export]
//! file_name = "flyer.html"
//! ```

use serde::Deserialize;

use crate::error::EditorResult;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasConfig,
    pub stage: StageConfig,
    pub blocks: BlocksConfig,
    pub export: ExportConfig,
}

/// Fixed poster viewport, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 720.0,
        }
    }
}

/// Presentation affordances painted on the stage only, never exported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub outline: String,
    pub outline_offset: String,
    pub cursor: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            outline: "2px solid #3b82f6".to_string(),
            outline_offset: "2px".to_string(),
            cursor: "pointer".to_string(),
        }
    }
}

/// Markup appended by the add-text and add-image commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    pub text: String,
    pub image: String,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            text: r#"<p style="position: absolute; top: 50px; left: 50px; font-size: 16px; color: #000000;">New Text Block</p>"#
                .to_string(),
            image: r#"<img src="https://via.placeholder.com/150" alt="New Image" style="position: absolute; top: 100px; left: 100px; width: 150px; height: 150px;" />"#
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
    pub title: String,
    pub lang: String,
    pub generator: String,
    pub base_style: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "poster.html".to_string(),
            title: "Exported Poster".to_string(),
            lang: "en".to_string(),
            generator: "poster-editor".to_string(),
            base_style: "body { margin: 0; padding: 0; }".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) TOML document on top of the defaults.
    pub fn from_toml_str(source: &str) -> EditorResult<Self> {
        let config: EditorConfig = toml::from_str(source)?;
        log::debug!(
            "Editor config loaded: canvas {}x{}, export file `{}`",
            config.canvas.width,
            config.canvas.height,
            config.export.file_name
        );
        Ok(config)
    }
}
