use std::sync::Arc;

use tally_app::{
    config::store::StoreSettings,
    context::AppContext,
    domain::{
        catalog::MockCatalogService, customers::MockCustomersService,
        inventory::MockInventoryService, orders::MockOrdersService,
        reports::MockReportsService, staff::MockStaffService,
    },
};

/// Service mocks that become an [`AppContext`] once expectations are set.
#[derive(Default)]
pub(crate) struct Mocks {
    pub catalog: MockCatalogService,
    pub inventory: MockInventoryService,
    pub staff: MockStaffService,
    pub customers: MockCustomersService,
    pub orders: MockOrdersService,
    pub reports: MockReportsService,
}

impl Mocks {
    pub(crate) fn into_context(self) -> AppContext {
        AppContext {
            catalog: Arc::new(self.catalog),
            inventory: Arc::new(self.inventory),
            staff: Arc::new(self.staff),
            customers: Arc::new(self.customers),
            orders: Arc::new(self.orders),
            reports: Arc::new(self.reports),
            settings: StoreSettings::default(),
        }
    }
}
