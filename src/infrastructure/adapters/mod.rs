//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod route_registry;
mod state_store;

pub use config_repository::JsonConfigRepository;
pub use route_registry::ConfigRouteRegistry;
pub use state_store::JsonStateStore;
