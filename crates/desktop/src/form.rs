//! Sales form presenter.
//!
//! Holds the raw text of the input fields, the grid selection and the pending
//! notification; every user action is forwarded to the [`Ledger`] and the
//! display is rebuilt from it via [`SalesForm::view`].

use std::collections::HashSet;

use thiserror::Error;

use salesdesk_core::{AggregateId, AggregateRoot, DomainError, ValidationError};
use salesdesk_sales::{Ledger, LedgerId, LineField, LineItem, LineItemId};

use crate::config::FormConfig;
use crate::types::{Column, FormView, InputField, Notification, RowView};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("the {} column is computed and cannot be edited", .0.header())]
    ReadOnlyColumn(Column),

    /// Row index past the last item (includes the new-row placeholder).
    #[error("no item in row {0}")]
    NoSuchRow(usize),
}

#[derive(Debug)]
pub struct SalesForm {
    ledger: Ledger,
    item_name: String,
    quantity: String,
    price: String,
    focus: InputField,
    selection: HashSet<LineItemId>,
    notification: Option<Notification>,
    digit_grouping: bool,
}

impl SalesForm {
    /// Open the form with an empty ledger.
    pub fn new(config: &FormConfig) -> Self {
        Self {
            ledger: Ledger::new(LedgerId::new(AggregateId::new())),
            item_name: String::new(),
            quantity: String::new(),
            price: String::new(),
            focus: InputField::ItemName,
            selection: HashSet::new(),
            notification: None,
            digit_grouping: config.digit_grouping,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::ItemName => &self.item_name,
            InputField::Quantity => &self.quantity,
            InputField::Price => &self.price,
        }
    }

    pub fn set_input(&mut self, field: InputField, text: impl Into<String>) {
        let text = text.into();
        match field {
            InputField::ItemName => self.item_name = text,
            InputField::Quantity => self.quantity = text,
            InputField::Price => self.price = text,
        }
        self.focus = field;
    }

    pub fn focus(&self) -> InputField {
        self.focus
    }

    /// Number of grid rows, including the trailing new-row placeholder.
    pub fn grid_row_count(&self) -> usize {
        self.ledger.len() + 1
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// "Add Item" button.
    ///
    /// On success the inputs are cleared and focus returns to the item name.
    /// On failure the inputs are kept and a validation warning is raised.
    pub fn click_add(&mut self) -> Result<LineItemId, ValidationError> {
        match self.ledger.add_item(&self.item_name, &self.quantity, &self.price) {
            Ok(item) => {
                self.item_name.clear();
                self.quantity.clear();
                self.price.clear();
                self.focus = InputField::ItemName;
                Ok(item.id_typed())
            }
            Err(err) => {
                self.notify(err);
                Err(err)
            }
        }
    }

    /// Replace the grid selection with the given row indices.
    ///
    /// Indices past the last item (the placeholder included) are not
    /// selectable and are dropped.
    pub fn select_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.selection = rows
            .into_iter()
            .filter_map(|row| self.ledger.items().get(row).map(LineItem::id_typed))
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Indices of the selected rows, in grid order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.ledger
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| self.selection.contains(&item.id_typed()))
            .map(|(row, _)| row)
            .collect()
    }

    /// "Delete Selected" button. Returns the number of rows removed.
    pub fn click_delete_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selection);
        self.ledger.remove_items(selected)
    }

    /// In-place cell edit; the grid shows the retained value after a rejection.
    pub fn edit_cell(&mut self, row: usize, column: Column, text: &str) -> Result<(), FormError> {
        let field = match column {
            Column::Item => LineField::ItemName,
            Column::Quantity => LineField::Quantity,
            Column::Price => LineField::UnitPrice,
            Column::Amount => return Err(FormError::ReadOnlyColumn(column)),
        };
        let item_id = self
            .ledger
            .items()
            .get(row)
            .map(LineItem::id_typed)
            .ok_or(FormError::NoSuchRow(row))?;

        match self.ledger.edit_item(item_id, field, text) {
            Ok(()) => Ok(()),
            Err(DomainError::Validation(err)) => {
                self.notify(err);
                Err(err.into())
            }
            Err(_) => Err(FormError::NoSuchRow(row)),
        }
    }

    /// Build the display model from the current ledger state.
    pub fn view(&self) -> FormView {
        let grouping = self.digit_grouping;
        let rows = self
            .ledger
            .items()
            .iter()
            .map(|item| RowView {
                item_id: item.id_typed(),
                item: item.name().to_string(),
                quantity: item.quantity().get().to_string(),
                price: item.unit_price().as_money().format(grouping),
                amount: item.amount().format(grouping),
                selected: self.selection.contains(&item.id_typed()),
            })
            .collect();

        FormView {
            item_name: self.item_name.clone(),
            quantity: self.quantity.clone(),
            price: self.price.clone(),
            focus: self.focus,
            rows,
            total_label: self.ledger.total_label(grouping),
            notification: self.notification.clone(),
            version: self.ledger.version(),
        }
    }

    fn notify(&mut self, err: ValidationError) {
        self.notification = Some(Notification::validation(err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_form() -> SalesForm {
        SalesForm::new(&FormConfig::default())
    }

    fn fill(form: &mut SalesForm, name: &str, quantity: &str, price: &str) {
        form.set_input(InputField::ItemName, name);
        form.set_input(InputField::Quantity, quantity);
        form.set_input(InputField::Price, price);
    }

    fn add(form: &mut SalesForm, name: &str, quantity: &str, price: &str) -> LineItemId {
        fill(form, name, quantity, price);
        form.click_add().unwrap()
    }

    #[test]
    fn successful_add_clears_inputs_and_focuses_name() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");

        assert_eq!(form.input(InputField::ItemName), "");
        assert_eq!(form.input(InputField::Quantity), "");
        assert_eq!(form.input(InputField::Price), "");
        assert_eq!(form.focus(), InputField::ItemName);
        assert!(form.notification().is_none());

        let view = form.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].item, "Pen");
        assert_eq!(view.rows[0].quantity, "10");
        assert_eq!(view.rows[0].price, "2.50");
        assert_eq!(view.rows[0].amount, "25.00");
        assert_eq!(view.total_label, "Total: 25.00");
    }

    #[test]
    fn failed_add_keeps_inputs_and_warns() {
        let mut form = test_form();
        fill(&mut form, "Pen", "0", "2.50");

        assert_eq!(form.click_add(), Err(ValidationError::InvalidQuantity));
        assert_eq!(form.input(InputField::ItemName), "Pen");
        assert_eq!(form.input(InputField::Quantity), "0");

        let note = form.notification().unwrap();
        assert_eq!(note.title, "Validation");
        assert_eq!(note.message, "Quantity must be a positive integer.");
        assert!(form.ledger().is_empty());

        form.dismiss_notification();
        assert!(form.notification().is_none());
    }

    #[test]
    fn empty_name_warns_with_name_message() {
        let mut form = test_form();
        fill(&mut form, "   ", "1", "1.00");
        assert_eq!(form.click_add(), Err(ValidationError::EmptyName));
        assert_eq!(form.notification().unwrap().message, "Item Name is required.");
        assert_eq!(form.view().total_label, "Total: 0.00");
    }

    #[test]
    fn delete_selected_removes_rows_and_clears_selection() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");
        add(&mut form, "Notebook", "3", "4.00");
        add(&mut form, "Eraser", "2", "0.50");

        form.select_rows([0, 2]);
        assert_eq!(form.selected_rows(), vec![0, 2]);
        assert!(form.view().rows[0].selected);

        assert_eq!(form.click_delete_selected(), 2);
        assert!(form.selected_rows().is_empty());
        let view = form.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].item, "Notebook");
        assert_eq!(view.total_label, "Total: 12.00");
    }

    #[test]
    fn placeholder_row_is_never_deleted() {
        let mut form = test_form();
        add(&mut form, "Pen", "1", "1");
        assert_eq!(form.grid_row_count(), 2);

        form.select_rows([1, 7]);
        assert!(form.selected_rows().is_empty());
        assert_eq!(form.click_delete_selected(), 0);
        assert_eq!(form.ledger().len(), 1);
    }

    #[test]
    fn cell_edit_recomputes_amount_and_total() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");
        add(&mut form, "Notebook", "3", "4.00");

        form.edit_cell(0, Column::Quantity, "5").unwrap();
        let view = form.view();
        assert_eq!(view.rows[0].amount, "12.50");
        assert_eq!(view.rows[1].amount, "12.00");
        assert_eq!(view.total_label, "Total: 24.50");
    }

    #[test]
    fn rejected_cell_edit_reverts_and_warns() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");

        let err = form.edit_cell(0, Column::Price, "-3").unwrap_err();
        assert_eq!(err, FormError::Validation(ValidationError::InvalidPrice));
        assert_eq!(form.view().rows[0].price, "2.50");
        assert_eq!(
            form.notification().unwrap().message,
            "Price must be a non-negative decimal."
        );
    }

    #[test]
    fn amount_column_is_read_only() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");

        assert_eq!(
            form.edit_cell(0, Column::Amount, "1.00"),
            Err(FormError::ReadOnlyColumn(Column::Amount))
        );
        assert_eq!(form.edit_cell(1, Column::Quantity, "2"), Err(FormError::NoSuchRow(1)));
        assert_eq!(form.view().rows[0].amount, "25.00");
        assert!(form.notification().is_none());
    }

    #[test]
    fn displayed_price_can_be_typed_back() {
        let mut form = test_form();
        add(&mut form, "Laptop", "2", "1234.5");
        let view = form.view();
        assert_eq!(view.rows[0].price, "1,234.50");
        assert_eq!(view.total_label, "Total: 2,469.00");

        let shown = view.rows[0].price.clone();
        form.edit_cell(0, Column::Price, &shown).unwrap();
        assert_eq!(form.view().total_label, "Total: 2,469.00");
    }

    #[test]
    fn grouping_can_be_disabled() {
        let config = FormConfig {
            digit_grouping: false,
            ..FormConfig::default()
        };
        let mut form = SalesForm::new(&config);
        add(&mut form, "Laptop", "2", "1234.5");
        assert_eq!(form.view().total_label, "Total: 2469.00");
    }

    #[test]
    fn view_serializes_for_the_webview() {
        let mut form = test_form();
        add(&mut form, "Pen", "10", "2.50");

        let json = serde_json::to_value(form.view()).unwrap();
        assert_eq!(json["total_label"], "Total: 25.00");
        assert_eq!(json["focus"], "item_name");
        assert_eq!(json["rows"][0]["amount"], "25.00");
        assert!(json["notification"].is_null());
    }
}
