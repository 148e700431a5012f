//! Editable column name: `Display <-> Editing`.
//!
//! ```text
//! Display -> Editing    click (ignored when read-only)
//! Editing -> Display    blur / Enter   commit, emits a rename if changed
//! Editing -> Display    Escape         cancel, buffer restored, no rename
//! ```

use crate::constants::{RENAME_INPUT_CLASS, RENAME_INPUT_NAME};
use crate::grid::intent::RenameInfo;
use crate::types::ColumnType;
use serde::Serialize;

/// Keys the name input reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKey {
    Enter,
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum NameEditMode {
    #[default]
    Display,
    Editing,
}

/// Render model for the name control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NameView {
    Display {
        /// Class of the clickable root (`column-key`)
        class: &'static str,
        value: String,
        /// Class of the secondary type line (`column-type`)
        type_class: &'static str,
        type_label: Option<&'static str>,
    },
    Editing {
        input_name: &'static str,
        input_class: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct EditableColumnName {
    column_key: String,
    column_type: Option<ColumnType>,
    is_read_only: bool,
    mode: NameEditMode,
    buffer: String,
    /// Set on entering edit mode, consumed by the painter to focus the input
    /// and select its text
    focus_requested: bool,
}

impl EditableColumnName {
    pub fn new(
        column_key: impl Into<String>,
        column_type: Option<ColumnType>,
        is_read_only: bool,
    ) -> Self {
        let column_key = column_key.into();
        Self {
            buffer: column_key.clone(),
            column_key,
            column_type,
            is_read_only,
            mode: NameEditMode::Display,
            focus_requested: false,
        }
    }

    /// Take new props. An in-progress edit keeps its buffer.
    pub fn set_props(
        &mut self,
        column_key: &str,
        column_type: Option<ColumnType>,
        is_read_only: bool,
    ) {
        if self.column_key != column_key {
            self.column_key = column_key.to_string();
            if !self.is_editing() {
                self.buffer = self.column_key.clone();
            }
        }
        self.column_type = column_type;
        self.is_read_only = is_read_only;
    }

    pub fn is_editing(&self) -> bool {
        self.mode == NameEditMode::Editing
    }

    pub fn column_key(&self) -> &str {
        &self.column_key
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Click on the displayed name. Returns true if edit mode was entered.
    pub fn enter_edit_mode(&mut self) -> bool {
        if self.is_read_only {
            return false;
        }
        if !self.is_editing() {
            self.mode = NameEditMode::Editing;
            self.buffer = self.column_key.clone();
            self.focus_requested = true;
        }
        true
    }

    /// Returns true once after entering edit mode: focus the input and
    /// select all of its text.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn input_change(&mut self, text: impl Into<String>) {
        if self.is_editing() {
            self.buffer = text.into();
        }
    }

    pub fn blur(&mut self) -> Option<RenameInfo> {
        self.commit()
    }

    pub fn key_down(&mut self, key: NameKey) -> Option<RenameInfo> {
        match key {
            NameKey::Enter => self.commit(),
            NameKey::Escape => {
                self.cancel();
                None
            }
            NameKey::Other => None,
        }
    }

    fn commit(&mut self) -> Option<RenameInfo> {
        if !self.is_editing() {
            return None;
        }
        self.mode = NameEditMode::Display;
        self.focus_requested = false;

        if self.buffer != self.column_key {
            Some(RenameInfo {
                prev_name: self.column_key.clone(),
                new_name: self.buffer.clone(),
            })
        } else {
            None
        }
    }

    fn cancel(&mut self) {
        self.buffer = self.column_key.clone();
        self.mode = NameEditMode::Display;
        self.focus_requested = false;
    }

    pub fn view(&self) -> NameView {
        match self.mode {
            NameEditMode::Editing => NameView::Editing {
                input_name: RENAME_INPUT_NAME,
                input_class: RENAME_INPUT_CLASS,
                value: self.buffer.clone(),
            },
            NameEditMode::Display => NameView::Display {
                class: "column-key",
                value: self.buffer.clone(),
                type_class: "column-type",
                type_label: self.column_type.map(ColumnType::label),
            },
        }
    }
}
