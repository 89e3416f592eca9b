//! Boundary traits and the death-occurrence model.
//!
//! Everything the hosting game server must provide lives here: chat
//! delivery, the invoking player's identity, and the per-death context
//! assembled from the engine's combat state. The rest of the crate never
//! touches engine types directly.

/// Fire-and-forget delivery of a message to every connected client.
pub trait ChatSink: Send + Sync {
    fn broadcast(&self, message: &str);
}

/// The identity behind a chat message or command invocation.
pub trait CommandSource: Send + Sync {
    /// Stable string identifier (steam id).
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Private reply visible only to this player.
    fn reply(&self, message: &str);

    /// Whether this player holds the named permission grant.
    fn has_permission(&self, perm: &str) -> bool;
}

/// A combat participant as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    pub id: String,
    pub is_npc: bool,
}

impl Actor {
    pub fn player(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            is_npc: false,
        }
    }

    pub fn npc(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            is_npc: true,
        }
    }
}

/// The victim's last-recorded attacker. Traps carry only their prefab
/// short name; there is no player behind them.
#[derive(Debug, Clone, PartialEq)]
pub enum Attacker {
    Player(Actor),
    Trap { short_name: String },
}

/// One death event as delivered by the engine. Exists only for the
/// duration of a single classification call.
#[derive(Debug, Clone)]
pub struct DeathOccurrence {
    pub victim: Actor,
    /// Whoever initiated the killing hit, if the engine resolved one.
    pub initiator: Option<Actor>,
    /// Last attacker recorded on the victim, which may be a trap.
    pub last_attacker: Option<Attacker>,
    /// Short prefab name of the weapon used, if any.
    pub weapon: Option<String>,
    /// Projectile travel distance in meters.
    pub distance: f32,
    pub headshot: bool,
}
