//! Death-event publishing.
//!
//! Serializes confirmed player-vs-player kills into the canonical one-line
//! JSON shape and hands them to an append-only sink. Fire-and-forget: the
//! sink is never awaited and a lost record is acceptable.

use serde::Serialize;

/// A player identity as it appears in the serialized event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerRef {
    pub username: String,
    #[serde(rename = "steamID")]
    pub steam_id: String,
}

impl PlayerRef {
    pub fn new(username: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            steam_id: steam_id.into(),
        }
    }
}

/// One qualifying player-vs-player death. Only ever constructed from a
/// `PlayerKill` classification; trap kills never produce a record.
#[derive(Debug, Clone, Serialize)]
pub struct DeathEventRecord {
    pub player: PlayerRef,
    pub killer: PlayerRef,
    pub distance: f32,
    pub headshot: bool,
    pub weapon: String,
}

/// Append-only destination for serialized event lines.
pub trait EventSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Default sink: one log line per record, picked up by whatever collector
/// tails the server log.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, line: &str) {
        log::info!("{}", line);
    }
}

/// Serializes `record` and writes it to the sink exactly once.
///
/// Serialization failure drops the record silently; nothing in this path
/// may disturb the death hook that called it.
pub fn publish(record: &DeathEventRecord, sink: &dyn EventSink) {
    if let Ok(line) = serde_json::to_string(record) {
        sink.emit(&line);
    }
}
