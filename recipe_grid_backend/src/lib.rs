pub mod app_config;
pub mod page_service;
