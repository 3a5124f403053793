//! Edit modal state: scratch display fields and the save workflow

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::twin::{FieldValue, TwinView};
use crate::twin_client::{PatchOperation, UpdateResponse};

/// Status the twin store answers a successful update with
pub const UPDATE_SUCCESS_STATUS: u16 = 204;

/// Where the modal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPhase {
    #[default]
    Closed,
    Open,
    Saving,
}

/// The editable form fields, addressed by their form input names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Color,
    Icon,
    Order,
}

impl EditField {
    pub const ALL: [EditField; 4] = [
        EditField::Name,
        EditField::Color,
        EditField::Icon,
        EditField::Order,
    ];

    pub fn form_name(&self) -> &'static str {
        match self {
            EditField::Name => "modalName",
            EditField::Color => "modalColor",
            EditField::Icon => "modalIcon",
            EditField::Order => "modalOrder",
        }
    }

    /// Number-typed inputs are parsed as integers when possible
    pub fn is_numeric(&self) -> bool {
        matches!(self, EditField::Order)
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

impl FromStr for EditField {
    type Err = crate::TwinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditField::ALL
            .into_iter()
            .find(|field| field.form_name() == s)
            .ok_or_else(|| crate::TwinboardError::Dashboard(format!("Unknown form field '{}'", s)))
    }
}

/// Scratch copies of the display fields being edited
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditFields {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub order: FieldValue,
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The store accepted the patch
    Saved,
    /// The store answered with something other than 204
    Rejected { status: u16 },
    /// The request never got an answer
    Failed { error: String },
    /// There was no open edit to save
    NotOpen,
}

/// Edit state of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    phase: EditPhase,
    twin_id: String,
    fields: EditFields,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditPhase::Closed
    }

    pub fn twin_id(&self) -> &str {
        &self.twin_id
    }

    pub fn fields(&self) -> &EditFields {
        &self.fields
    }

    /// Open the modal for a twin, seeding the scratch fields from its display.
    ///
    /// Refused while a save is in flight, since settling that save resets
    /// the session.
    pub fn open(&mut self, twin: &TwinView) -> bool {
        if self.phase == EditPhase::Saving {
            tracing::debug!(
                "Not opening twin '{}' while '{}' is saving",
                twin.name,
                self.twin_id
            );
            return false;
        }
        self.twin_id = twin.name.clone();
        self.fields = EditFields {
            name: twin.display.name.clone().unwrap_or_default(),
            color: twin.display.color.clone().unwrap_or_default(),
            icon: twin.display.icon.clone().unwrap_or_default(),
            order: twin.display.order.clone().unwrap_or_default(),
        };
        self.phase = EditPhase::Open;
        tracing::debug!("Opened edit for twin '{}'", self.twin_id);
        true
    }

    /// Apply raw form input to the scratch copy.
    ///
    /// Numeric fields hold an integer when the input parses and the raw
    /// string otherwise, so a half-typed value is never rejected. Input is
    /// ignored while a save is in flight.
    pub fn apply_input(&mut self, field: EditField, value: &str) -> bool {
        if self.phase == EditPhase::Saving {
            return false;
        }
        match field {
            EditField::Name => self.fields.name = value.to_string(),
            EditField::Color => self.fields.color = value.to_string(),
            EditField::Icon => self.fields.icon = value.to_string(),
            EditField::Order => self.fields.order = parse_numeric_input(value),
        }
        true
    }

    /// Close without saving; the scratch copy is left for the next open to overwrite.
    /// A save in flight cannot be cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.phase == EditPhase::Saving {
            return false;
        }
        self.phase = EditPhase::Closed;
        true
    }

    /// The fixed four-operation replace patch for the current scratch values
    pub fn build_patch(&self) -> Vec<PatchOperation> {
        vec![
            PatchOperation::replace("/Display/Name", FieldValue::text(&self.fields.name)),
            PatchOperation::replace("/Display/Icon", FieldValue::text(&self.fields.icon)),
            PatchOperation::replace("/Display/Color", FieldValue::text(&self.fields.color)),
            PatchOperation::replace("/Display/Order", self.fields.order.clone()),
        ]
    }

    /// Move to `Saving` and hand out the target id and patch.
    ///
    /// Returns `None` unless the modal is open; a save already in flight is
    /// not started twice.
    pub fn begin_save(&mut self) -> Option<(String, Vec<PatchOperation>)> {
        if self.phase != EditPhase::Open {
            return None;
        }
        self.phase = EditPhase::Saving;
        Some((self.twin_id.clone(), self.build_patch()))
    }

    /// Settle a save: 204 resets and closes, anything else reopens with the
    /// user's edits intact
    pub fn finish_save(&mut self, result: &crate::Result<UpdateResponse>) -> SaveOutcome {
        match result {
            Ok(response) if response.status == UPDATE_SUCCESS_STATUS => {
                *self = EditSession::default();
                SaveOutcome::Saved
            }
            Ok(response) => {
                self.phase = EditPhase::Open;
                SaveOutcome::Rejected {
                    status: response.status,
                }
            }
            Err(e) => {
                self.phase = EditPhase::Open;
                SaveOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

fn parse_numeric_input(value: &str) -> FieldValue {
    match value.trim().parse::<i64>() {
        Ok(n) => FieldValue::int(n),
        Err(_) => FieldValue::text(value),
    }
}
