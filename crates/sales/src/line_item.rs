use serde::{Deserialize, Serialize};

use salesdesk_core::{Entity, EntityId, ValidationError, ValueObject};

use crate::money::Money;
use crate::numeric::{parse_decimal, parse_integer};

/// Line item identifier (stable across deletions of other rows).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub EntityId);

impl LineItemId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Item name: trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ItemName {}

/// Quantity sold: a positive whole number within `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        match parse_integer(text) {
            Some(n) if n > 0 => Ok(Self(n.unsigned_abs())),
            _ => Err(ValidationError::InvalidQuantity),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl ValueObject for Quantity {}

/// Unit price: a non-negative decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UnitPrice(Money);

impl UnitPrice {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        match parse_decimal(text) {
            Some(value) if !value.is_sign_negative() => Ok(Self(Money::new(value))),
            _ => Err(ValidationError::InvalidPrice),
        }
    }

    pub fn as_money(self) -> Money {
        self.0
    }
}

impl ValueObject for UnitPrice {}

/// Editable column of a line item. The amount is derived and never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    ItemName,
    Quantity,
    UnitPrice,
}

impl LineField {
    /// Parse `text` for this field and return the edited copy of `item`.
    ///
    /// Errors carry the field's own validation kind; an amount that would not
    /// be representable is reported against the edited field.
    pub(crate) fn edit(self, item: &LineItem, text: &str) -> Result<LineItem, ValidationError> {
        match self {
            LineField::ItemName => Ok(LineItem {
                name: ItemName::parse(text)?,
                ..item.clone()
            }),
            LineField::Quantity => {
                let quantity = Quantity::parse(text)?;
                LineItem::priced(item.id, item.name.clone(), quantity, item.unit_price)
                    .ok_or(ValidationError::InvalidQuantity)
            }
            LineField::UnitPrice => {
                let unit_price = UnitPrice::parse(text)?;
                LineItem::priced(item.id, item.name.clone(), item.quantity, unit_price)
                    .ok_or(ValidationError::InvalidPrice)
            }
        }
    }
}

/// One sold product: name, quantity, unit price and the derived amount.
///
/// Fields are private so that `amount` can only ever be
/// `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    id: LineItemId,
    name: ItemName,
    quantity: Quantity,
    unit_price: UnitPrice,
    amount: Money,
}

impl LineItem {
    /// Validate raw field text in order (name, quantity, price) and build an item.
    ///
    /// The first failing rule is reported; later fields are not inspected.
    pub fn parse(
        id: LineItemId,
        name: &str,
        quantity: &str,
        unit_price: &str,
    ) -> Result<Self, ValidationError> {
        let name = ItemName::parse(name)?;
        let quantity = Quantity::parse(quantity)?;
        let unit_price = UnitPrice::parse(unit_price)?;
        Self::priced(id, name, quantity, unit_price).ok_or(ValidationError::InvalidPrice)
    }

    /// Build an item from validated parts; `None` if the amount overflows.
    pub fn priced(
        id: LineItemId,
        name: ItemName,
        quantity: Quantity,
        unit_price: UnitPrice,
    ) -> Option<Self> {
        let amount = unit_price.as_money().checked_times(quantity.get())?;
        Some(Self {
            id,
            name,
            quantity,
            unit_price,
            amount,
        })
    }

    pub fn id_typed(&self) -> LineItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_computes_amount() {
        let item = LineItem::parse(LineItemId::new(), " Pen ", "10", "2.50").unwrap();
        assert_eq!(item.name(), "Pen");
        assert_eq!(item.quantity().get(), 10);
        assert_eq!(item.unit_price().as_money(), Money::new(dec!(2.50)));
        assert_eq!(item.amount(), Money::new(dec!(25.00)));
        assert_eq!(*Entity::id(&item), item.id_typed());
    }

    #[test]
    fn validation_short_circuits_in_field_order() {
        let id = LineItemId::new();
        assert_eq!(LineItem::parse(id, "  ", "x", "-1"), Err(ValidationError::EmptyName));
        assert_eq!(LineItem::parse(id, "Pen", "0", "-1"), Err(ValidationError::InvalidQuantity));
        assert_eq!(LineItem::parse(id, "Pen", "1", "-1"), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn quantity_must_be_a_positive_integer() {
        for text in ["0", "-3", "1.5", "ten", ""] {
            assert_eq!(Quantity::parse(text), Err(ValidationError::InvalidQuantity), "input {text:?}");
        }
        assert_eq!(Quantity::parse("2147483647").map(Quantity::get), Ok(i32::MAX as u32));
    }

    #[test]
    fn free_items_are_allowed() {
        let item = LineItem::parse(LineItemId::new(), "Sample", "3", "0").unwrap();
        assert_eq!(item.amount(), Money::ZERO);
        assert!(UnitPrice::parse("-0").is_ok());
    }

    #[test]
    fn overflowing_amount_is_an_invalid_price() {
        let huge = Decimal::MAX.to_string();
        assert_eq!(
            LineItem::parse(LineItemId::new(), "Yacht", "2", &huge),
            Err(ValidationError::InvalidPrice)
        );
    }

    #[test]
    fn editing_quantity_recomputes_amount_only_for_that_item() {
        let item = LineItem::parse(LineItemId::new(), "Pen", "10", "2.50").unwrap();
        let edited = LineField::Quantity.edit(&item, "5").unwrap();
        assert_eq!(edited.id_typed(), item.id_typed());
        assert_eq!(edited.amount(), Money::new(dec!(12.50)));
        assert_eq!(item.amount(), Money::new(dec!(25.00)));
    }

    #[test]
    fn rejected_edit_reports_the_field_kind() {
        let item = LineItem::parse(LineItemId::new(), "Pen", "10", "2.50").unwrap();
        assert_eq!(LineField::ItemName.edit(&item, " "), Err(ValidationError::EmptyName));
        assert_eq!(LineField::Quantity.edit(&item, "2.5"), Err(ValidationError::InvalidQuantity));
        assert_eq!(LineField::UnitPrice.edit(&item, "abc"), Err(ValidationError::InvalidPrice));
    }
}
