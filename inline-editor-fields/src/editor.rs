//! InlineEditor: the enclosing scope input adapters register with.
//!
//! The editor only records who registered. It holds no reference to any
//! adapter, so adapters and editor can be dropped in any order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::TypeTag;

/// Handle issued to an adapter when it registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InputId(u32);

impl InputId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "input-{}", self.0)
    }
}

/// What an adapter told the editor about itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: InputId,
    pub field_name: String,
    pub type_tag: TypeTag,
}

/// Whether the editor shows values or their inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// Enclosing coordinator for a group of inline inputs.
#[derive(Debug, Default)]
pub struct InlineEditor {
    mode: EditMode,
    registrations: Vec<Registration>,
    next_id: u32,
}

impl InlineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input. Called once per adapter, at construction.
    pub fn register(&mut self, field_name: &str, type_tag: &TypeTag) -> InputId {
        let id = InputId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            field_name: field_name.to_string(),
            type_tag: type_tag.clone(),
        });
        debug!(%id, field = field_name, type_tag = %type_tag, "input registered with inline editor");
        id
    }

    /// All registrations, in registration order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn registration(&self, id: InputId) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    /// First registration bound to `field_name`.
    pub fn find_field(&self, field_name: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|r| r.field_name == field_name)
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// Switch to editing. Returns `false` if already editing.
    pub fn begin_edit(&mut self) -> bool {
        let changed = self.mode != EditMode::Editing;
        self.mode = EditMode::Editing;
        changed
    }

    /// Switch back to viewing. Returns `false` if not editing.
    pub fn end_edit(&mut self) -> bool {
        let changed = self.mode != EditMode::Viewing;
        self.mode = EditMode::Viewing;
        changed
    }
}
