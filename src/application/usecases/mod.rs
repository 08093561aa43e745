//! 유스케이스 모음.

pub mod build_command;
pub mod execute_command;
pub mod inspect_config;
pub mod lifecycle;
pub mod process_api;
pub mod resolve_executable;
