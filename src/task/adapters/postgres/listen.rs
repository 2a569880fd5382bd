//! `PostgreSQL` LISTEN/NOTIFY change feed.
//!
//! A row trigger on `todotasks` (see [`NOTIFY_TRIGGER_SQL`]) calls
//! `pg_notify` on [`CHANGE_CHANNEL`] for every insert, update and delete,
//! with a JSON payload such as `{"op":"UPDATE","id":"<uuid>"}`. The feed
//! keeps one pooled connection listening on that channel, drains it on a
//! short poll interval inside `spawn_blocking`, and fans the resulting
//! [`ChangeEvent`]s out through a [`BroadcastChangeFeed`].
//!
//! The listening connection is held for the lifetime of the feed, so the
//! pool needs at least one connection more than the store uses.

use super::repository::TaskPgPool;
use crate::task::{
    adapters::memory::BroadcastChangeFeed,
    domain::TaskId,
    ports::{
        ChangeEvent, ChangeFeed, ChangeKind, ChangeSubscription, TaskStoreError, TaskStoreResult,
    },
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

/// Notification channel the trigger publishes to.
pub const CHANGE_CHANNEL: &str = "todotasks_changes";

/// Default delay between two drains of the listening connection.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Installs the notification trigger on `todotasks`. Idempotent.
pub const NOTIFY_TRIGGER_SQL: &str = r"
CREATE OR REPLACE FUNCTION notify_todotasks_change() RETURNS trigger AS $$
DECLARE
    row_id uuid;
BEGIN
    IF TG_OP = 'DELETE' THEN
        row_id := OLD.id;
    ELSE
        row_id := NEW.id;
    END IF;
    PERFORM pg_notify(
        'todotasks_changes',
        json_build_object('op', TG_OP, 'id', row_id)::text
    );
    RETURN NULL;
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS todotasks_notify ON todotasks;
CREATE TRIGGER todotasks_notify
    AFTER INSERT OR UPDATE OR DELETE ON todotasks
    FOR EACH ROW EXECUTE FUNCTION notify_todotasks_change();
";

const LISTEN_SQL: &str = "LISTEN todotasks_changes";

type ListenerConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Change feed backed by `PostgreSQL` notifications.
///
/// Dropping the feed stops the listener task; the connection goes back to
/// the pool after an `UNLISTEN`.
#[derive(Debug)]
pub struct ListenChangeFeed {
    feed: BroadcastChangeFeed,
    _shutdown: oneshot::Sender<()>,
}

impl ListenChangeFeed {
    /// Starts listening on [`CHANGE_CHANNEL`] and returns the feed.
    ///
    /// Must be called from within a Tokio runtime. Connection failures are
    /// logged and retried on the next poll; each successful (re)connect
    /// publishes a [`ChangeKind::Bulk`] event because notifications sent
    /// while disconnected are lost.
    #[must_use]
    pub fn spawn(pool: TaskPgPool, poll_interval: Duration) -> Self {
        let feed = BroadcastChangeFeed::default();
        let (shutdown, stopped) = oneshot::channel();
        tokio::spawn(listen(pool, feed.clone(), poll_interval, stopped));
        Self {
            feed,
            _shutdown: shutdown,
        }
    }

    /// Creates the trigger that feeds [`CHANGE_CHANNEL`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when no connection is
    /// available or the statements fail, typically for lack of privileges.
    pub async fn install_trigger(pool: &TaskPgPool) -> TaskStoreResult<()> {
        let shared = pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = shared.get().map_err(TaskStoreError::persistence)?;
            connection
                .batch_execute(NOTIFY_TRIGGER_SQL)
                .map_err(TaskStoreError::persistence)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

impl ChangeFeed for ListenChangeFeed {
    fn subscribe(&self) -> ChangeSubscription {
        self.feed.subscribe()
    }
}

async fn listen(
    pool: TaskPgPool,
    feed: BroadcastChangeFeed,
    poll_interval: Duration,
    mut stopped: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(poll_interval.max(Duration::from_millis(10)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut connection: Option<ListenerConnection> = None;

    loop {
        tokio::select! {
            _ = &mut stopped => break,
            _ = ticker.tick() => {
                connection = poll(&pool, &feed, connection.take()).await;
            }
        }
    }

    if let Some(mut held) = connection {
        let released =
            tokio::task::spawn_blocking(move || held.batch_execute("UNLISTEN *")).await;
        if !matches!(released, Ok(Ok(()))) {
            tracing::debug!("listener connection released without UNLISTEN");
        }
    }
    tracing::debug!("change listener stopped");
}

struct Drained {
    connection: ListenerConnection,
    events: Vec<ChangeEvent>,
    reconnected: bool,
}

async fn poll(
    pool: &TaskPgPool,
    feed: &BroadcastChangeFeed,
    held: Option<ListenerConnection>,
) -> Option<ListenerConnection> {
    let shared = pool.clone();
    match tokio::task::spawn_blocking(move || drain(&shared, held)).await {
        Ok(Ok(drained)) => {
            if drained.reconnected {
                tracing::info!(channel = CHANGE_CHANNEL, "listening for task changes");
                feed.publish(ChangeEvent::bulk());
            }
            for event in drained.events {
                feed.publish(event);
            }
            Some(drained.connection)
        }
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "change listener poll failed; reconnecting");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "change listener poll aborted");
            None
        }
    }
}

fn drain(pool: &TaskPgPool, held: Option<ListenerConnection>) -> TaskStoreResult<Drained> {
    let (mut connection, reconnected) = held.map_or_else(
        || connect(pool).map(|fresh| (fresh, true)),
        |existing| Ok((existing, false)),
    )?;

    let mut events = Vec::new();
    for received in connection.notifications_iter() {
        let notification = received.map_err(TaskStoreError::persistence)?;
        if notification.channel == CHANGE_CHANNEL {
            events.push(event_from_payload(&notification.payload));
        }
    }

    Ok(Drained {
        connection,
        events,
        reconnected,
    })
}

fn connect(pool: &TaskPgPool) -> TaskStoreResult<ListenerConnection> {
    let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
    connection
        .batch_execute(LISTEN_SQL)
        .map_err(TaskStoreError::persistence)?;
    Ok(connection)
}

#[derive(Debug, Deserialize)]
struct NotificationPayload {
    op: String,
    #[serde(default)]
    id: Option<String>,
}

/// Maps a trigger payload to a change event.
///
/// Anything that cannot be read as a single-row change becomes a bulk
/// change; the board re-fetches either way.
fn event_from_payload(payload: &str) -> ChangeEvent {
    let Ok(parsed) = serde_json::from_str::<NotificationPayload>(payload) else {
        tracing::debug!(payload, "unreadable change payload");
        return ChangeEvent::bulk();
    };
    let kind = match parsed.op.to_ascii_uppercase().as_str() {
        "INSERT" => ChangeKind::Insert,
        "UPDATE" => ChangeKind::Update,
        "DELETE" => ChangeKind::Delete,
        _ => return ChangeEvent::bulk(),
    };
    parsed
        .id
        .and_then(|raw| raw.parse::<TaskId>().ok())
        .map_or_else(ChangeEvent::bulk, |task_id| {
            ChangeEvent::for_task(kind, task_id)
        })
}
