//! Redis-backed cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::runtime::Handle;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::store::{CacheError, EntityCache};

const CONNECT_RETRIES: usize = 1;

/// Cache backed by an external Redis server.
///
/// The connection is opened by a background task on first use. Until it is
/// up, every call fails immediately with [`CacheError::Unavailable`], which
/// the read-through layer treats as a miss. A failed attempt is retried on
/// the next call.
pub struct RedisCache {
    client: Client,
    connect_timeout: Duration,
    response_timeout: Duration,
    link: Arc<Link>,
}

#[derive(Default)]
struct Link {
    manager: OnceCell<ConnectionManager>,
    connecting: AtomicBool,
}

impl RedisCache {
    pub fn open(
        url: &str,
        connect_timeout: Duration,
        response_timeout: Duration,
    ) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|err| CacheError::Configuration(err.to_string()))?;
        Ok(Self {
            client,
            connect_timeout,
            response_timeout,
            link: Arc::new(Link::default()),
        })
    }

    fn connection(&self) -> Result<ConnectionManager, CacheError> {
        if let Some(manager) = self.link.manager.get() {
            return Ok(manager.clone());
        }
        self.spawn_connect();
        Err(CacheError::Unavailable(
            "redis connection not established".to_string(),
        ))
    }

    fn spawn_connect(&self) {
        if self.link.connecting.swap(true, Ordering::AcqRel) {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            self.link.connecting.store(false, Ordering::Release);
            return;
        };

        let client = self.client.clone();
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECT_RETRIES)
            .set_connection_timeout(self.connect_timeout)
            .set_response_timeout(self.response_timeout);
        let link = Arc::clone(&self.link);

        runtime.spawn(async move {
            match ConnectionManager::new_with_config(client, config).await {
                Ok(manager) => {
                    if link.manager.set(manager).is_ok() {
                        info!(target = "bookshelf::cache", "Connected to redis");
                    }
                }
                Err(err) => {
                    warn!(
                        target = "bookshelf::cache",
                        error = %err,
                        "Redis connection attempt failed"
                    );
                }
            }
            link.connecting.store(false, Ordering::Release);
        });
    }
}

#[async_trait]
impl EntityCache for RedisCache {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let mut conn = self.connection()?;
        let value: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|err| CacheError::Command(err.to_string()))?;
        Ok(value.map(Bytes::from))
    }

    async fn set(&self, key: &str, payload: Bytes) -> Result<(), CacheError> {
        let mut conn = self.connection()?;
        // Plain SET: no expiry is ever attached to an entry.
        conn.set::<_, _, ()>(key, payload.as_ref())
            .await
            .map_err(|err| CacheError::Command(err.to_string()))
    }
}
