use super::context::use_editor;
use crate::shared::components::ui::{Button, Textarea};
use crate::shared::file_reader::{picked_file, read_text, reset_picker};
use crate::shared::modal::Modal;
use editor_core::{Command, CommandOutcome};
use leptos::prelude::*;

/// Import from an `.html` file or from pasted markup. Either path replaces
/// the whole poster.
#[component]
pub fn ImportDialog(on_close: Callback<()>) -> impl IntoView {
    let editor = use_editor();
    let pasted = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let run = move |command: Command| -> bool {
        match editor.update(|s| s.dispatch(command)) {
            Some(Ok(CommandOutcome::Imported)) => true,
            Some(Ok(_)) | None => false,
            Some(Err(e)) => {
                log::error!("Import failed: {}", e);
                error.set(Some(e.to_string()));
                false
            }
        }
    };

    let on_file = move |ev: leptos::ev::Event| {
        let Some(file) = picked_file(&ev) else { return };
        reset_picker(&ev);
        leptos::task::spawn_local(async move {
            match read_text(&file).await {
                Ok(text) => {
                    log::info!("Importing {} ({} bytes)", file.name(), text.len());
                    run(Command::ImportFile(text));
                }
                Err(e) => {
                    log::error!("{}", e);
                    error.set(Some(e));
                }
            }
        });
    };

    let can_load = move || editor.read(|s| s.toolbar_state(&pasted.get()).can_load_paste);

    let on_load = move |_| {
        if run(Command::ImportPasted(pasted.get_untracked())) {
            pasted.set(String::new());
            on_close.run(());
        }
    };

    view! {
        <Modal title="Import HTML".to_string() on_close=on_close>
            <div class="import">
                <label class="form__group">
                    <span class="form__label">"Upload HTML File"</span>
                    <input type="file" accept=".html" class="form__file" on:change=on_file/>
                </label>
                <div class="import__divider">"or"</div>
                <Textarea
                    label="Paste HTML Code"
                    value=pasted
                    on_input=Callback::new(move |v| pasted.set(v))
                    placeholder="Paste your HTML code here..."
                    rows=10
                    class="form__textarea--code"
                />
                <Button disabled=Signal::derive(move || !can_load()) on_click=Callback::new(on_load)>
                    "Load HTML"
                </Button>
                {move || error.get().map(|e| view! { <p class="import__error">{e}</p> })}
            </div>
        </Modal>
    }
}
