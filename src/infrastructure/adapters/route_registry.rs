//! 설정 파일의 `routes` 항목으로 CLI 라우트를 조회하는 어댑터.

use std::collections::BTreeMap;

use crate::application::config::{Config, RouteConfig};
use crate::application::ports::{Route, RouteRegistry};

pub struct ConfigRouteRegistry {
    routes: BTreeMap<String, RouteConfig>,
}

impl ConfigRouteRegistry {
    pub fn from_config(config: &Config) -> Self {
        Self {
            routes: config.routes.clone(),
        }
    }
}

impl RouteRegistry for ConfigRouteRegistry {
    fn route(&self, command: &str) -> Option<Route> {
        self.routes.get(command).map(|cfg| Route {
            access: cfg.access.clone(),
        })
    }
}
