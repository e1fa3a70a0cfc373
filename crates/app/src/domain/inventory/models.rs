//! Inventory Models

use jiff::civil::Date;

use crate::{domain::catalog::models::CatalogItemUuid, uuids::TypedUuid};

/// Inventory UUID
pub type InventoryUuid = TypedUuid<InventoryRecord>;

/// Stock on hand for one catalog item.
///
/// Saved records always carry `uuid` and `item_uuid`; a new record only
/// needs `item_name`, which is resolved against the catalog on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub uuid: Option<InventoryUuid>,
    pub item_uuid: Option<CatalogItemUuid>,
    pub item_name: String,
    pub quantity: u32,
    pub unit: String,
    pub par_level: u32,
    pub reorder_point: u32,
    pub last_restocked: Option<Date>,
    pub last_counted: Option<Date>,
}

impl InventoryRecord {
    /// An unsaved record for the catalog item named `item_name`.
    #[must_use]
    pub fn new(item_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            uuid: None,
            item_uuid: None,
            item_name: item_name.into(),
            quantity,
            unit: "each".to_string(),
            par_level: 0,
            reorder_point: 0,
            last_restocked: None,
            last_counted: None,
        }
    }

    /// Set the par level and reorder point.
    #[must_use]
    pub fn with_levels(mut self, par_level: u32, reorder_point: u32) -> Self {
        self.par_level = par_level;
        self.reorder_point = reorder_point;
        self
    }

    /// Whether stock has fallen to the reorder point.
    #[must_use]
    pub fn needs_restock(&self) -> bool {
        self.quantity <= self.reorder_point
    }

    /// How many units would bring stock back up to par.
    #[must_use]
    pub fn shortfall(&self) -> u32 {
        self.par_level.saturating_sub(self.quantity)
    }
}

/// Integer columns of a record as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StockLevels {
    pub quantity: i32,
    pub par_level: i32,
    pub reorder_point: i32,
}

impl TryFrom<&InventoryRecord> for StockLevels {
    type Error = std::num::TryFromIntError;

    fn try_from(record: &InventoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            quantity: i32::try_from(record.quantity)?,
            par_level: i32::try_from(record.par_level)?,
            reorder_point: i32::try_from(record.reorder_point)?,
        })
    }
}
