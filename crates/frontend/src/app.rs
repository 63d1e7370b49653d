use crate::editor::{EditorContext, PropertiesPanel, Stage, Toolbar};
use crate::shared::config::{load_config, tagged_export_styles};
use editor_core::{FocusKind, KeyOutcome, KeyPress};
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let editor = EditorContext::new(load_config());
    provide_context(editor);

    editor.update(|s| {
        for (name, css) in tagged_export_styles() {
            s.styles_mut().register(&name, &css, true);
        }
    });

    // Delete/Backspace removes the selection unless a text field has focus.
    let keys = window_event_listener(ev::keydown, move |event: ev::KeyboardEvent| {
        let focus = document()
            .active_element()
            .map(|el| FocusKind::from_tag_name(&el.tag_name()))
            .unwrap_or(FocusKind::Other);
        let press = KeyPress { key: event.key(), focus };

        if let Some(KeyOutcome::Deleted(node)) = editor.update(|s| s.handle_key(&press)) {
            event.prevent_default();
            log::debug!("Deleted {} from keyboard", node);
        }
    });
    on_cleanup(move || keys.remove());

    view! {
        <div class="editor">
            <Toolbar/>
            <div class="editor__body">
                <main class="editor__canvas">
                    <Stage/>
                </main>
                <PropertiesPanel/>
            </div>
        </div>
    }
}
