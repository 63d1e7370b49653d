//! Editing core for the poster editor.
//!
//! Everything the browser shell needs to edit a poster lives here and runs
//! without a DOM: the node arena, the import sanitizer, the drag state
//! machine, the properties form model and the standalone export.

pub mod commands;
pub mod config;
pub mod dom;
pub mod error;
pub mod export;
pub mod import;
pub mod properties;
pub mod session;
pub mod stage;
pub mod upload;

pub use commands::{Command, CommandOutcome, FocusKind, KeyOutcome, KeyPress, ToolbarState};
pub use config::EditorConfig;
pub use dom::{Document, NodeId};
pub use error::{EditorError, EditorResult};
pub use export::{ExportedPoster, StyleRegistry};
pub use properties::{EditOutcome, ImageDimension, PropertySnapshot};
pub use session::{DeleteOutcome, DocumentSession};
pub use stage::{InlineLayoutProbe, LayoutProbe, Point, PointerButton, PointerOutcome, Rect};
