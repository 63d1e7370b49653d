pub mod context;
pub mod import_dialog;
pub mod probe;
pub mod properties_panel;
pub mod stage;
pub mod toolbar;

pub use context::{use_editor, EditorContext};
pub use properties_panel::PropertiesPanel;
pub use stage::Stage;
pub use toolbar::Toolbar;
