//! Catalog Models

use rust_decimal::Decimal;
use tally::items::MenuItem;

use crate::uuids::TypedUuid;

/// Catalog Item UUID
pub type CatalogItemUuid = TypedUuid<CatalogItem>;

/// A drink or snack on the menu.
///
/// `uuid` is `None` until the item has been saved. Inactive items stay in the
/// catalog so past orders keep resolving, but are hidden from the till.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub uuid: Option<CatalogItemUuid>,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub active: bool,
}

impl CatalogItem {
    /// An active, unsaved item.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Decimal) -> Self {
        Self {
            uuid: None,
            name: name.into(),
            category: category.into(),
            price,
            active: true,
        }
    }

    /// The item as the cart sees it.
    #[must_use]
    pub fn to_menu_item(&self) -> MenuItem {
        let item = MenuItem::new(self.name.clone(), self.category.clone(), self.price);

        match self.uuid {
            Some(uuid) => item.with_key(uuid.into_uuid()),
            None => item,
        }
    }
}

#[cfg(test)]
mod tests {
    use tally::items::ItemIdentity;

    use super::*;

    #[test]
    fn saved_item_carries_key_into_cart() {
        let uuid = CatalogItemUuid::new();
        let item = CatalogItem {
            uuid: Some(uuid),
            ..CatalogItem::new("Thai Tea", "Milk Tea", Decimal::new(500, 2))
        };

        assert_eq!(item.to_menu_item().identity(), ItemIdentity::Key(uuid.into_uuid()));
    }

    #[test]
    fn unsaved_item_is_identified_by_name() {
        let item = CatalogItem::new("Thai Tea", "Milk Tea", Decimal::new(500, 2));

        assert_eq!(item.to_menu_item().identity(), ItemIdentity::Name("Thai Tea"));
    }
}
