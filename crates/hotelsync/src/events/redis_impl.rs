//! Redis list-backed event channel.
//!
//! Publishing pushes onto the head of `queue:<name>`; consumers pop from the
//! tail with `BRPOP`, so each event is delivered to exactly one of the
//! competing consumers and is acknowledged as soon as it is popped.

use async_trait::async_trait;
use redis::AsyncCommands;

use hotelsync_core::events::{
    decode_event, encode_event, queue_key, EventChannel, EventError, EventStream, HotelEvent,
    Result,
};

/// Seconds a `BRPOP` waits before the consumer loop polls again.
const POP_TIMEOUT_SECS: f64 = 5.0;

/// Maps Redis errors to EventError.
fn map_redis_error(err: redis::RedisError) -> EventError {
    EventError::Transport(err.to_string())
}

/// Redis event channel for running the roles as separate processes.
#[derive(Clone)]
pub struct RedisChannel {
    client: redis::Client,
    conn: redis::aio::ConnectionManager,
    key: String,
}

impl RedisChannel {
    /// Connects to Redis and binds the channel to the named queue.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Transport` if the connection cannot be established.
    pub async fn new(url: &str, queue_name: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            client,
            conn,
            key: queue_key(queue_name),
        })
    }
}

#[async_trait]
impl EventChannel for RedisChannel {
    async fn publish(&self, event: &HotelEvent) -> Result<()> {
        let payload = encode_event(event)?;
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(&self.key, payload)
            .await
            .map_err(map_redis_error)
    }

    async fn subscribe(&self) -> Result<EventStream> {
        // BRPOP blocks its connection, so the consumer gets its own.
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        let key = self.key.clone();

        let stream = async_stream::stream! {
            loop {
                let popped: Option<(String, Vec<u8>)> =
                    match conn.brpop(&key, POP_TIMEOUT_SECS).await {
                        Ok(popped) => popped,
                        Err(err) => {
                            yield Err(map_redis_error(err));
                            break;
                        }
                    };

                if let Some((_, payload)) = popped {
                    yield decode_event(&payload);
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
