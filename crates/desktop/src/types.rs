//! Render model handed to whatever draws the form.
//!
//! Everything here is plain data (already formatted) so a webview or a
//! terminal can display it without knowing about the ledger.

use serde::Serialize;

use salesdesk_sales::LineItemId;

/// Text input above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    ItemName,
    Quantity,
    Price,
}

/// Grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Item,
    Quantity,
    Price,
    /// Derived; read-only.
    Amount,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Item => "Item",
            Column::Quantity => "Quantity",
            Column::Price => "Price",
            Column::Amount => "Amount",
        }
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, Column::Amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Warning,
}

/// Blocking message box shown after a rejected action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            title: "Validation".to_string(),
            message: message.into(),
            kind: NotificationKind::Warning,
        }
    }
}

/// One grid row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub item_id: LineItemId,
    pub item: String,
    pub quantity: String,
    pub price: String,
    pub amount: String,
    pub selected: bool,
}

/// Entire form state, formatted for display.
///
/// `rows` holds item rows only; the grid draws the new-row placeholder after
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub item_name: String,
    pub quantity: String,
    pub price: String,
    pub focus: InputField,
    pub rows: Vec<RowView>,
    pub total_label: String,
    pub notification: Option<Notification>,
    pub version: u64,
}
