use super::context::use_editor;
use super::import_dialog::ImportDialog;
use crate::shared::components::ui::Button;
use crate::shared::export::download_poster;
use editor_core::{Command, CommandOutcome};
use leptos::prelude::*;

#[component]
pub fn Toolbar() -> impl IntoView {
    let editor = use_editor();
    let import_open = RwSignal::new(false);

    let run = move |command: Command| {
        match editor.update(|s| s.dispatch(command)) {
            Some(Ok(CommandOutcome::Exported(poster))) => {
                if let Err(e) = download_poster(&poster) {
                    log::error!("Export download failed: {}", e);
                }
            }
            Some(Ok(outcome)) => log::debug!("Toolbar command: {:?}", outcome),
            Some(Err(e)) => log::error!("Toolbar command failed: {}", e),
            None => {}
        }
    };

    let cannot_delete = Signal::derive(move || !editor.read(|s| s.has_selection()));

    view! {
        <div class="toolbar">
            <Button variant="secondary" icon_name="import" on_click=Callback::new(move |_| import_open.set(true))>
                "Import HTML"
            </Button>
            <span class="toolbar__separator"></span>
            <Button variant="secondary" icon_name="text" on_click=Callback::new(move |_| run(Command::AddTextBlock))>
                "Add Text"
            </Button>
            <Button variant="secondary" icon_name="image" on_click=Callback::new(move |_| run(Command::AddImageBlock))>
                "Add Image"
            </Button>
            <span class="toolbar__separator"></span>
            <Button
                variant="danger"
                icon_name="trash"
                title="Delete selected element (Delete / Backspace)"
                disabled=cannot_delete
                on_click=Callback::new(move |_| run(Command::DeleteSelection))
            >
                "Delete"
            </Button>
            <span class="toolbar__spacer"></span>
            <Button icon_name="download" on_click=Callback::new(move |_| run(Command::Export))>
                "Export HTML"
            </Button>
        </div>
        <Show when=move || import_open.get()>
            <ImportDialog on_close=Callback::new(move |_| import_open.set(false))/>
        </Show>
    }
}
