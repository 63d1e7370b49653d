//! Async reads of user-picked files.
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};
use wasm_bindgen::JsCast;

/// First file of the `<input type="file">` that fired `event`.
pub fn picked_file(event: &Event) -> Option<File> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Clears the input so choosing the same file again fires `change`.
pub fn reset_picker(event: &Event) {
    if let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

pub async fn read_text(file: &File) -> Result<String, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    text.as_string()
        .ok_or_else(|| format!("{} did not decode as text", file.name()))
}

pub async fn read_bytes(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;

    let bytes = js_sys::Uint8Array::new(&buffer);
    let mut out = vec![0; bytes.length() as usize];
    bytes.copy_to(&mut out);
    Ok(out)
}
