use super::context::{use_editor, EditorContext};
use crate::shared::components::ui::{Input, Textarea};
use crate::shared::file_reader::{picked_file, read_bytes, reset_picker};
use editor_core::{DocumentSession, EditOutcome, ImageDimension};
use leptos::prelude::*;

type Edit = fn(&mut DocumentSession, &str) -> EditOutcome;

fn write_through(editor: EditorContext, apply: Edit) -> Callback<String> {
    Callback::new(move |value: String| {
        let outcome = editor.update(|s| apply(s, &value));
        if outcome != Some(EditOutcome::Applied) {
            log::debug!("Property edit not applied: {:?}", outcome);
        }
    })
}

/// Side panel mirroring the selected element. Every keystroke is written
/// through to the poster.
#[component]
pub fn PropertiesPanel() -> impl IntoView {
    let editor = use_editor();

    // Changes only when another node is selected.
    let selection = Memo::new(move |_| {
        editor.read(|s| s.properties().map(|p| (p.node, p.is_image())))
    });
    let tag_name = editor.property(|p| p.tag_name.as_str());

    let on_upload = move |ev: leptos::ev::Event| {
        let Some(file) = picked_file(&ev) else { return };
        reset_picker(&ev);
        let Some(pending) = editor.session.with_value(|s| s.begin_upload()) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match read_bytes(&file).await {
                Ok(bytes) => {
                    let mime = file.type_();
                    editor.update(|s| s.complete_upload(pending, &mime, &bytes));
                }
                Err(e) => log::error!("Image upload failed: {}", e),
            }
        });
    };

    let image_fields = move || {
        view! {
            <Input label="Image URL" value=editor.property(|p| p.src.as_str()) on_input=write_through(editor, |s, v| s.set_image_src(v))/>
            <label class="form__group">
                <span class="form__label">"Upload New Image"</span>
                <input type="file" accept="image/*" class="form__file" on:change=on_upload/>
            </label>
            <Input label="Alt Text" value=editor.property(|p| p.alt.as_str()) on_input=write_through(editor, |s, v| s.set_image_alt(v))/>
            <div class="form__row">
                <Input
                    label="Width"
                    input_type="number"
                    value=editor.property(|p| p.width.as_str())
                    on_input=write_through(editor, |s, v| s.set_image_dimension(ImageDimension::Width, v))
                />
                <Input
                    label="Height"
                    input_type="number"
                    value=editor.property(|p| p.height.as_str())
                    on_input=write_through(editor, |s, v| s.set_image_dimension(ImageDimension::Height, v))
                />
            </div>
        }
        .into_any()
    };

    let text_fields = move || {
        view! {
            <Textarea
                label="Text Content"
                rows=5
                value=editor.property(|p| p.text_content.as_str())
                on_input=write_through(editor, |s, v| s.set_text_content(v))
            />
            <Input
                label="Font Size"
                placeholder="16px"
                value=editor.property(|p| p.font_size.as_str())
                on_input=write_through(editor, |s, v| s.set_style("font-size", v))
            />
            <Input
                label="Color"
                placeholder="#000000"
                value=editor.property(|p| p.color.as_str())
                on_input=write_through(editor, |s, v| s.set_style("color", v))
            />
            <Input
                label="Font Weight"
                placeholder="400, 700, bold"
                value=editor.property(|p| p.font_weight.as_str())
                on_input=write_through(editor, |s, v| s.set_style("font-weight", v))
            />
        }
        .into_any()
    };

    view! {
        <aside class="properties">
            <h3 class="properties__title">"Properties"</h3>
            {move || match selection.get() {
                None => view! {
                    <p class="properties__empty">"Select an element to edit its properties"</p>
                }
                .into_any(),
                Some((_, is_image)) => view! {
                    <p class="properties__element">{move || format!("Element: <{}>", tag_name.get())}</p>
                    {if is_image { image_fields() } else { text_fields() }}
                    <div class="properties__section">
                        <p class="properties__subtitle">"Position"</p>
                        <div class="form__row">
                            <Input
                                label="Left"
                                placeholder="0px"
                                value=editor.property(|p| p.left.as_str())
                                on_input=write_through(editor, |s, v| s.set_style("left", v))
                            />
                            <Input
                                label="Top"
                                placeholder="0px"
                                value=editor.property(|p| p.top.as_str())
                                on_input=write_through(editor, |s, v| s.set_style("top", v))
                            />
                        </div>
                    </div>
                }
                .into_any(),
            }}
        </aside>
    }
}
