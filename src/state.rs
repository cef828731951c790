use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use crate::config::Config;
use crate::db::Store;
use crate::domain::events::NotificationEvent;
use crate::services::{
    AuthService, CatalogService, NotificationLogger, SeaOrmAuthService, SeaOrmCatalogService,
    WriteDispatcher,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub event_bus: broadcast::Sender<NotificationEvent>,

    pub catalog: Arc<dyn CatalogService>,

    pub auth: Arc<dyn AuthService>,

    pub writes: WriteDispatcher,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size);
        Self::with_event_bus(config, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let config = Arc::new(RwLock::new(config));

        NotificationLogger::new(event_bus.clone()).start_listener();

        let catalog = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            config.clone(),
            event_bus.clone(),
        )) as Arc<dyn CatalogService + Send + Sync + 'static>;

        let auth = Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let writes = WriteDispatcher::new(store.clone(), event_bus.clone());

        Ok(Self {
            config,
            store,
            event_bus,
            catalog,
            auth,
            writes,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
