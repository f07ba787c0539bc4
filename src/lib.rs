// Library for tests to access modules

pub mod assembler;
pub mod command;
pub mod config;
pub mod device_map;
pub mod df_repo;
pub mod error;
pub mod models;
pub mod process_repo;
pub mod routes;
pub mod sysinfo_repo;
pub mod version;
