//! Entry points wired to the game server.
//!
//! [`DeathFeed`] owns the immutable configuration and the boundary
//! handles, maps death occurrences to their side effects, and routes the
//! `!stats`/`!podium` chat shortcuts and the permission-gated commands to
//! the stats and podium clients.

use std::sync::Arc;

use crate::classifier::{classify, Outcome};
use crate::config::Config;
use crate::engine::{ChatSink, CommandSource, DeathOccurrence};
use crate::podium;
use crate::publisher::{publish, DeathEventRecord, EventSink, PlayerRef};
use crate::stats;
use crate::webrequest::WebRequester;

/// Permission required to run the `stats` command.
pub const PERM_STATS: &str = "deathfeed.stats";
/// Permission required to run the `podium` command.
pub const PERM_PODIUM: &str = "deathfeed.podium";

pub struct DeathFeed {
    config: Config,
    chat: Arc<dyn ChatSink>,
    sink: Box<dyn EventSink>,
    requester: Arc<dyn WebRequester>,
}

impl DeathFeed {
    pub fn new(
        config: Config,
        chat: Arc<dyn ChatSink>,
        sink: Box<dyn EventSink>,
        requester: Arc<dyn WebRequester>,
    ) -> Self {
        Self {
            config,
            chat,
            sink,
            requester,
        }
    }

    /// Death hook. Runs synchronously on the game-event thread; the only
    /// side effects are the chat broadcast and the sink write, neither of
    /// which blocks.
    pub fn on_player_death(&self, occurrence: &DeathOccurrence) {
        match classify(occurrence) {
            Outcome::PlayerKill {
                victim,
                killer,
                distance,
                headshot,
                weapon,
            } => {
                let headshot_tag = if headshot { "Yay" } else { "Nay" };
                self.chat.broadcast(&format!(
                    "<color=#a52a2aff>{}</color> kills <color=red>{}</color> ({:.2}m) Hs: {}",
                    killer.name, victim.name, distance, headshot_tag
                ));

                let record = DeathEventRecord {
                    player: PlayerRef::new(victim.name, victim.id),
                    killer: PlayerRef::new(killer.name, killer.id),
                    distance,
                    headshot,
                    weapon,
                };
                publish(&record, self.sink.as_ref());
            }
            Outcome::TrapKill { victim } => {
                // Landmine kills are announced but never sent to the
                // collector.
                self.chat.broadcast(&format!(
                    "<color=red>{}</color> stepped on a landmine.",
                    victim.name
                ));
            }
            Outcome::Ignored => {}
        }
    }

    /// Chat hook. Recognizes the exact shortcuts `!podium` and `!stats`
    /// from any connected player; anything else passes through untouched.
    pub fn on_user_chat(&self, source: Arc<dyn CommandSource>, message: &str) {
        if message == "!podium" {
            podium::fetch(&self.config, self.requester.as_ref(), Arc::clone(&self.chat));
        } else if message == "!stats" {
            stats::fetch(&self.config, self.requester.as_ref(), source);
        }
    }

    /// The `stats` command. Queries the invoker's own id; there is no way
    /// to look up another player. Takes no arguments.
    pub fn stats_command(&self, source: Arc<dyn CommandSource>) {
        if !source.has_permission(PERM_STATS) {
            return;
        }
        stats::fetch(&self.config, self.requester.as_ref(), source);
    }

    /// The `podium` command. Broadcasts the leaderboard to everyone.
    pub fn podium_command(&self, source: Arc<dyn CommandSource>) {
        if !source.has_permission(PERM_PODIUM) {
            return;
        }
        podium::fetch(&self.config, self.requester.as_ref(), Arc::clone(&self.chat));
    }
}
