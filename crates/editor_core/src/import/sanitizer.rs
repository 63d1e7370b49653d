//! Allow-list sanitizer for imported body markup.
//!
//! Policy on top of ammonia's defaults:
//! - `<style>` blocks are kept (ammonia normally drops them with their content)
//! - HTML5 sectioning/phrasing tags and inline SVG shapes are kept
//! - `class`, `style` and `id` are allowed on every tag
//! - `data:` URLs are allowed on `img[src]` only, so embedded images survive
//!   a re-import
//! - scripts, `on*` handlers and `javascript:` URLs are still removed

use std::borrow::Cow;

use maplit::hashset;

/// Layout and text tags posters use that ammonia's default set lacks.
const POSTER_TAGS: [&str; 17] = [
    "section", "main", "article", "aside", "header", "footer", "nav", "figure", "figcaption",
    "button", "font", "label", "picture", "source", "time", "output", "center",
];

/// Inline SVG elements. Names are matched after html5ever's case fixups.
const SVG_TAGS: [&str; 14] = [
    "svg", "g", "defs", "path", "circle", "ellipse", "rect", "line", "polyline", "polygon",
    "text", "tspan", "linearGradient", "stop",
];

const SVG_ATTRIBUTES: [&str; 27] = [
    "xmlns", "viewBox", "preserveAspectRatio", "width", "height", "x", "y", "x1", "y1", "x2",
    "y2", "cx", "cy", "r", "rx", "ry", "d", "points", "transform", "fill", "fill-opacity",
    "stroke", "stroke-width", "stroke-linecap", "stroke-linejoin", "offset", "stop-color",
];

pub fn sanitize_markup(markup: &str) -> String {
    let mut builder = ammonia::Builder::new();
    builder
        .rm_clean_content_tags(&["style"])
        .add_tags(&["style"])
        .add_tags(&POSTER_TAGS)
        .add_tags(&SVG_TAGS)
        .add_generic_attributes(hashset!["class", "style", "id"])
        .add_tag_attributes("button", &["type", "disabled"])
        .add_tag_attributes("font", &["color", "face", "size"])
        .add_tag_attributes("source", &["srcset", "media", "type"])
        .add_tag_attributes("time", &["datetime"])
        .add_url_schemes(&["data"])
        .attribute_filter(only_images_embed_data);
    for tag in SVG_TAGS {
        builder.add_tag_attributes(tag, &SVG_ATTRIBUTES);
    }
    builder.clean(markup).to_string()
}

/// `data:` passes ammonia's scheme check everywhere; keep it on `img[src]`.
fn only_images_embed_data<'u>(
    element: &str,
    attribute: &str,
    value: &'u str,
) -> Option<Cow<'u, str>> {
    let is_data_url = value
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
    if is_data_url && !(element == "img" && attribute == "src") {
        return None;
    }
    Some(Cow::Borrowed(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_and_handlers_are_removed() {
        let clean = sanitize_markup(
            r#"<div class="card" onclick="steal()">Hi<script>alert(1)</script></div><a href="javascript:alert(2)">x</a>"#,
        );
        assert!(clean.contains(r#"<div class="card">Hi</div>"#));
        assert!(!clean.contains("script"));
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("javascript:"));
    }

    #[test]
    fn test_style_blocks_and_inline_styles_survive() {
        let clean = sanitize_markup(
            r#"<style>.poster { color: red; }</style><p id="t" style="left: 5px;">x</p>"#,
        );
        assert!(clean.contains("<style>.poster { color: red; }</style>"));
        assert!(clean.contains(r#"id="t""#));
        assert!(clean.contains(r#"style="left: 5px;""#));
    }

    #[test]
    fn test_data_url_images_survive() {
        let clean = sanitize_markup(r#"<img src="data:image/png;base64,AAAA" alt="a">"#);
        assert!(clean.contains("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_data_urls_are_dropped_outside_images() {
        let clean = sanitize_markup(
            r#"<a href="data:text/html,<script>alert(1)</script>">x</a><a href="https://example.com/">y</a>"#,
        );
        assert!(!clean.contains("data:"));
        assert!(clean.contains(r#"href="https://example.com/""#));
    }

    #[test]
    fn test_sectioning_wrappers_keep_their_class() {
        let clean =
            sanitize_markup(r#"<section class="poster"><main><h1>Sale</h1></main></section>"#);
        assert_eq!(clean, r#"<section class="poster"><main><h1>Sale</h1></main></section>"#);
    }

    #[test]
    fn test_buttons_fonts_and_svg_survive() {
        let clean = sanitize_markup(
            r#"<button class="cta">Buy</button><font color="red">f</font><svg viewBox="0 0 10 10"><circle r="5" fill="red"></circle></svg>"#,
        );
        assert!(clean.contains(r#"<button class="cta">Buy</button>"#));
        assert!(clean.contains(r#"<font color="red">f</font>"#));
        assert!(clean.contains("<svg"));
        assert!(clean.contains(r#"viewBox="0 0 10 10""#));
        assert!(clean.contains(r#"<circle r="5" fill="red">"#));
    }
}
