//! Toolbar commands and keyboard routing.

use crate::dom::NodeId;
use crate::error::EditorResult;
use crate::export::ExportedPoster;
use crate::session::{DeleteOutcome, DocumentSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text of a user-chosen HTML file.
    ImportFile(String),
    /// Text pasted into the import dialog.
    ImportPasted(String),
    AddTextBlock,
    AddImageBlock,
    DeleteSelection,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Imported,
    Added(Vec<NodeId>),
    Deleted(DeleteOutcome),
    Exported(ExportedPoster),
    /// The command was disabled in the current state and did nothing.
    Disabled,
}

/// Enablement of the toolbar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub can_delete: bool,
    pub can_load_paste: bool,
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    /// `<input>`, `<textarea>` and friends; keys belong to the control.
    TextInput,
    Other,
}

impl FocusKind {
    pub fn from_tag_name(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
            Self::TextInput
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`.
    pub key: String,
    pub focus: FocusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key deleted the selection; the host must suppress the browser's
    /// default action.
    Deleted(NodeId),
    Ignored,
}

fn is_paste_loadable(text: &str) -> bool {
    !text.trim().is_empty()
}

impl DocumentSession {
    pub fn toolbar_state(&self, pasted: &str) -> ToolbarState {
        ToolbarState {
            can_delete: self.has_selection(),
            can_load_paste: is_paste_loadable(pasted),
        }
    }

    pub fn dispatch(&mut self, command: Command) -> EditorResult<CommandOutcome> {
        let outcome = match command {
            Command::ImportFile(text) => {
                self.import_html(&text)?;
                CommandOutcome::Imported
            }
            Command::ImportPasted(text) => {
                if !is_paste_loadable(&text) {
                    log::debug!("Ignoring paste import of blank text");
                    return Ok(CommandOutcome::Disabled);
                }
                self.import_html(&text)?;
                CommandOutcome::Imported
            }
            Command::AddTextBlock => CommandOutcome::Added(self.add_text_block()?),
            Command::AddImageBlock => CommandOutcome::Added(self.add_image_block()?),
            Command::DeleteSelection => {
                if !self.has_selection() {
                    return Ok(CommandOutcome::Disabled);
                }
                CommandOutcome::Deleted(self.delete_selection())
            }
            Command::Export => CommandOutcome::Exported(self.export()),
        };
        Ok(outcome)
    }

    /// Delete/Backspace removes the selection unless focus is in a text
    /// control.
    pub fn handle_key(&mut self, press: &KeyPress) -> KeyOutcome {
        if !matches!(press.key.as_str(), "Delete" | "Backspace") {
            return KeyOutcome::Ignored;
        }
        if press.focus == FocusKind::TextInput || !self.has_selection() {
            return KeyOutcome::Ignored;
        }

        match self.delete_selection() {
            DeleteOutcome::Removed(node) => KeyOutcome::Deleted(node),
            DeleteOutcome::NothingSelected | DeleteOutcome::Detached => KeyOutcome::Ignored,
        }
    }
}
