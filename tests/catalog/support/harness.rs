use std::{collections::BTreeMap, sync::Arc};

use datadoc_catalog::catalog::{CatalogServices, assemble_catalog_services};

use super::fakes::{FakeCatalogReportRepository, FakeSchemaIntrospectionRepository, FakeTable};

pub struct CatalogHarness {
    pub database: FakeSchemaIntrospectionRepository,
    pub reports: Arc<FakeCatalogReportRepository>,
    pub services: CatalogServices,
}

pub fn create_catalog_harness(tables: BTreeMap<String, FakeTable>) -> CatalogHarness {
    let database = FakeSchemaIntrospectionRepository::new(tables);
    let reports = Arc::new(FakeCatalogReportRepository::new());

    let services = assemble_catalog_services(Arc::new(database.clone()), reports.clone());

    CatalogHarness {
        database,
        reports,
        services,
    }
}
