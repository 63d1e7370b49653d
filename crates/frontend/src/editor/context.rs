use editor_core::{DocumentSession, EditorConfig, PropertySnapshot};
use leptos::html::Div;
use leptos::prelude::*;

/// Shared editor state handed to every component through context.
///
/// The session lives outside the reactive graph; `revision` mirrors its
/// change counter so views re-render after every mutation.
#[derive(Clone, Copy)]
pub struct EditorContext {
    pub session: StoredValue<DocumentSession>,
    pub revision: RwSignal<u64>,
    /// The 720×720 canvas container.
    pub stage: NodeRef<Div>,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        let revision = RwSignal::new(0);
        let mut session = DocumentSession::new(config);
        session.set_update_listener(move |value| revision.set(value));

        Self {
            session: StoredValue::new(session),
            revision,
            stage: NodeRef::new(),
        }
    }

    /// Reactive read: subscribes the caller to session changes.
    pub fn read<R>(&self, f: impl FnOnce(&DocumentSession) -> R) -> R {
        self.revision.track();
        self.session.with_value(f)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut DocumentSession) -> R) -> Option<R> {
        self.session.try_update_value(f)
    }

    /// Reactive projection of one field of the properties snapshot; empty
    /// when nothing is selected.
    pub fn property(&self, field: fn(&PropertySnapshot) -> &str) -> Signal<String> {
        let this = *self;
        Signal::derive(move || {
            this.read(|session| {
                session
                    .properties()
                    .map(|snapshot| field(snapshot).to_string())
                    .unwrap_or_default()
            })
        })
    }
}

pub fn use_editor() -> EditorContext {
    use_context::<EditorContext>().expect("EditorContext not found. Provide it in App.")
}
