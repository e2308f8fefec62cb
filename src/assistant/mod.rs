use std::sync::Arc;

use crate::{
    assistant::{
        application::{
            acl::catalog_reader_facade_real_impl::CatalogReaderFacadeRealImpl,
            command_services::assistant_answer_service_impl::AssistantAnswerServiceImpl,
        },
        domain::services::assistant_answer_service::AssistantAnswerService,
        interfaces::acl::catalog_reader_facade::CatalogReaderFacade,
    },
    catalog::interfaces::acl::catalog_facade::CatalogFacade,
};

pub mod application;
pub mod domain;
pub mod interfaces;

pub fn build_assistant_service(
    catalog_facade: Arc<dyn CatalogFacade>,
) -> Arc<dyn AssistantAnswerService> {
    let catalog_reader: Arc<dyn CatalogReaderFacade> =
        Arc::new(CatalogReaderFacadeRealImpl::new(catalog_facade));
    Arc::new(AssistantAnswerServiceImpl::new(catalog_reader))
}
