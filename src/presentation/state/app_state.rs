use std::sync::Arc;

use crate::application::services::{RelayService, StreamProxyService};

#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<RelayService>,
    pub stream_proxy: Arc<StreamProxyService>,
}
