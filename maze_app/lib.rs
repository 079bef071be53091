pub mod app;
pub mod config;
pub mod filters;
pub mod repository;
pub mod storage;
pub mod stores;

pub mod test_utils;
