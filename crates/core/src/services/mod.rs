pub mod aggregation_service;
pub mod chart_service;
pub mod export_service;
pub mod fetch_service;
pub mod ingest_service;
pub mod stack_service;
