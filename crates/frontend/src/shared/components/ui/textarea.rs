use leptos::prelude::*;

/// Labelled multi-line field. `label` may be empty for bare use inside a
/// dialog.
#[component]
pub fn Textarea(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional)]
    rows: Option<u32>,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let textarea_rows = rows.unwrap_or(4);

    view! {
        <label class="form__group">
            {move || label.get().filter(|l| !l.is_empty()).map(|l| view! {
                <span class="form__label">{l}</span>
            })}
            <textarea
                class=move || format!("form__textarea {}", class.get().unwrap_or_default())
                placeholder=move || placeholder.get().unwrap_or_default()
                rows=textarea_rows
                prop:value=move || value.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            ></textarea>
        </label>
    }
}
