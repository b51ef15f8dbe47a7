use serde::{Deserialize, Serialize};

use salesdesk_core::{
    Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, ValidationError,
};

use crate::line_item::{LineField, LineItem, LineItemId};
use crate::money::Money;

/// Ledger identifier (one per form session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(pub AggregateId);

impl LedgerId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LedgerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Ledger (ordered line items of the current session).
///
/// Insertion order is preserved. The total is always derived from the items,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    id: LedgerId,
    items: Vec<LineItem>,
    version: u64,
}

/// Command: AddItem (raw field text as typed by the user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item_id: LineItemId,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
}

/// Command: RemoveItems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItems {
    pub item_ids: Vec<LineItemId>,
}

/// Command: EditItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditItem {
    pub item_id: LineItemId,
    pub field: LineField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AddItem(AddItem),
    RemoveItems(RemoveItems),
    EditItem(EditItem),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAdded {
    pub item: LineItem,
}

/// Event: ItemsRemoved (only ids that were present, in ledger order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemsRemoved {
    pub item_ids: Vec<LineItemId>,
}

/// Event: ItemEdited (carries the item as it is after the edit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemEdited {
    pub field: LineField,
    pub item: LineItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerEvent {
    ItemAdded(ItemAdded),
    ItemsRemoved(ItemsRemoved),
    ItemEdited(ItemEdited),
}

impl LedgerEvent {
    /// Stable event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::ItemAdded(_) => "sales.ledger.item_added",
            LedgerEvent::ItemsRemoved(_) => "sales.ledger.items_removed",
            LedgerEvent::ItemEdited(_) => "sales.ledger.item_edited",
        }
    }
}

impl Ledger {
    /// Create an empty ledger (session start).
    pub fn new(id: LedgerId) -> Self {
        Self {
            id,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> LedgerId {
        self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id_typed() == item_id)
    }

    /// Row index of an item, if it is still in the ledger.
    pub fn position(&self, item_id: LineItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id_typed() == item_id)
    }

    /// Sum of all amounts; zero for an empty ledger.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::amount).sum()
    }

    /// Display label for the total, e.g. `Total: 123.40`.
    pub fn total_label(&self, digit_grouping: bool) -> String {
        format!("Total: {}", self.total().format(digit_grouping))
    }

    /// Validate and append a new item; returns the item as stored.
    ///
    /// On error the ledger is left untouched.
    pub fn add_item(
        &mut self,
        name: &str,
        quantity: &str,
        unit_price: &str,
    ) -> Result<LineItem, ValidationError> {
        let item = self.decide_add(LineItemId::new(), name, quantity, unit_price)?;
        self.apply(&LedgerEvent::ItemAdded(ItemAdded { item: item.clone() }));
        Ok(item)
    }

    /// Remove every listed item that is still present.
    ///
    /// Unknown or already-removed ids are ignored. Returns the number of items
    /// removed.
    pub fn remove_items<I>(&mut self, item_ids: I) -> usize
    where
        I: IntoIterator<Item = LineItemId>,
    {
        let item_ids: Vec<LineItemId> = item_ids.into_iter().collect();
        match self.decide_remove(&item_ids) {
            Some(event) => {
                let removed = event.item_ids.len();
                self.apply(&LedgerEvent::ItemsRemoved(event));
                removed
            }
            None => 0,
        }
    }

    /// Remove every item matching `selector`. Returns the number removed.
    pub fn remove_where<F>(&mut self, mut selector: F) -> usize
    where
        F: FnMut(&LineItem) -> bool,
    {
        let selected: Vec<LineItemId> = self
            .items
            .iter()
            .filter(|item| selector(item))
            .map(LineItem::id_typed)
            .collect();
        self.remove_items(selected)
    }

    /// Replace one field of an item with freshly validated text.
    ///
    /// The amount follows quantity/price edits. A rejected edit keeps the
    /// prior value.
    pub fn edit_item(&mut self, item_id: LineItemId, field: LineField, value: &str) -> DomainResult<()> {
        let item = self.decide_edit(item_id, field, value)?;
        self.apply(&LedgerEvent::ItemEdited(ItemEdited { field, item }));
        Ok(())
    }

    fn decide_add(
        &self,
        item_id: LineItemId,
        name: &str,
        quantity: &str,
        unit_price: &str,
    ) -> Result<LineItem, ValidationError> {
        let item = LineItem::parse(item_id, name, quantity, unit_price)?;

        // The running total has to stay representable too.
        if self.total().checked_add(item.amount()).is_none() {
            return Err(ValidationError::InvalidPrice);
        }

        Ok(item)
    }

    fn decide_remove(&self, item_ids: &[LineItemId]) -> Option<ItemsRemoved> {
        let present: Vec<LineItemId> = self
            .items
            .iter()
            .map(LineItem::id_typed)
            .filter(|id| item_ids.contains(id))
            .collect();

        if present.is_empty() {
            None
        } else {
            Some(ItemsRemoved { item_ids: present })
        }
    }

    fn decide_edit(&self, item_id: LineItemId, field: LineField, value: &str) -> DomainResult<LineItem> {
        let current = self
            .get(item_id)
            .ok_or_else(|| DomainError::not_found(format!("line item {item_id}")))?;
        let edited = field.edit(current, value)?;

        let total_fits = self
            .total()
            .checked_sub(current.amount())
            .and_then(|rest| rest.checked_add(edited.amount()))
            .is_some();
        if !total_fits {
            let kind = match field {
                LineField::Quantity => ValidationError::InvalidQuantity,
                _ => ValidationError::InvalidPrice,
            };
            return Err(kind.into());
        }

        Ok(edited)
    }
}

impl AggregateRoot for Ledger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
                tracing::debug!(
                    ledger_id = %self.id,
                    item_id = %e.item.id_typed(),
                    rows = self.items.len(),
                    "line item added"
                );
            }
            LedgerEvent::ItemsRemoved(e) => {
                self.items.retain(|item| !e.item_ids.contains(&item.id_typed()));
                tracing::debug!(
                    ledger_id = %self.id,
                    removed = e.item_ids.len(),
                    rows = self.items.len(),
                    "line items removed"
                );
            }
            LedgerEvent::ItemEdited(e) => {
                let item_id = e.item.id_typed();
                if let Some(slot) = self.items.iter_mut().find(|item| item.id_typed() == item_id) {
                    *slot = e.item.clone();
                }
                tracing::debug!(
                    ledger_id = %self.id,
                    item_id = %item_id,
                    field = ?e.field,
                    "line item edited"
                );
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AddItem(cmd) => {
                if self.get(cmd.item_id).is_some() {
                    return Err(DomainError::invalid_id(format!(
                        "line item {} already exists",
                        cmd.item_id
                    )));
                }
                let item = self.decide_add(cmd.item_id, &cmd.name, &cmd.quantity, &cmd.unit_price)?;
                Ok(vec![LedgerEvent::ItemAdded(ItemAdded { item })])
            }
            LedgerCommand::RemoveItems(cmd) => Ok(self
                .decide_remove(&cmd.item_ids)
                .map(LedgerEvent::ItemsRemoved)
                .into_iter()
                .collect()),
            LedgerCommand::EditItem(cmd) => {
                let item = self.decide_edit(cmd.item_id, cmd.field, &cmd.value)?;
                Ok(vec![LedgerEvent::ItemEdited(ItemEdited {
                    field: cmd.field,
                    item,
                })])
            }
        }
    }
}
