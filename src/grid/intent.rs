//! Intents the grid emits to its owner.
//!
//! The grid never applies a reorder or rename itself. It packages the
//! gesture into a module action and hands it to `GridActions`; the new
//! column order or name comes back through props.

use crate::constants::{RENAME_COLUMNS_ACTION, REORDER_COLUMNS_ACTION};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of a `reorder-columns` action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderInfo {
    pub column: String,
    pub from: usize,
    pub to: usize,
}

/// Payload of a `rename-columns` action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameInfo {
    pub prev_name: String,
    pub new_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionParams {
    ReorderColumns(ReorderInfo),
    RenameColumns(RenameInfo),
}

/// A persisted mutation request against the module that owns the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAction {
    pub module_id: Option<u64>,
    pub action_id: &'static str,
    pub force_new_module: bool,
    pub params: ActionParams,
}

impl ModuleAction {
    pub fn reorder(module_id: Option<u64>, info: ReorderInfo) -> Self {
        Self {
            module_id,
            action_id: REORDER_COLUMNS_ACTION,
            force_new_module: false,
            params: ActionParams::ReorderColumns(info),
        }
    }

    pub fn rename(module_id: Option<u64>, info: RenameInfo) -> Self {
        Self {
            module_id,
            action_id: RENAME_COLUMNS_ACTION,
            force_new_module: false,
            params: ActionParams::RenameColumns(info),
        }
    }
}

/// A column context-menu request. `params` always carries `columnKey`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownAction {
    pub id_name: String,
    pub force_new_module: bool,
    pub params: Map<String, Value>,
}

/// The owner's action dispatcher
pub trait GridActions: Send + Sync {
    fn reorder_columns(&self, action: ModuleAction);

    fn rename_column(&self, action: ModuleAction);

    fn set_dropdown_action(&self, action: DropdownAction);
}
