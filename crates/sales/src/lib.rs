//! Sales line-item ledger.
//!
//! This crate contains the business rules of the sales form, implemented
//! purely as deterministic domain logic (no UI, no IO): input validation,
//! per-row amount recomputation and the running total.

pub mod ledger;
pub mod line_item;
pub mod money;
pub mod numeric;

pub use ledger::{
    AddItem, EditItem, ItemAdded, ItemEdited, ItemsRemoved, Ledger, LedgerCommand, LedgerEvent,
    LedgerId, RemoveItems,
};
pub use line_item::{ItemName, LineField, LineItem, LineItemId, Quantity, UnitPrice};
pub use money::Money;
