//! Server-wide leaderboard: fetch, decode, render, broadcast.

use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::engine::ChatSink;
use crate::stats::LooseField;
use crate::webrequest::WebRequester;

#[derive(Debug, Clone, Deserialize)]
pub struct PodiumEntry {
    pub name: String,
    #[serde(rename = "steamID", default)]
    pub steam_id: Option<LooseField>,
    /// 1-based rank as assigned by the collector.
    #[serde(rename = "podiumPosition")]
    pub podium_position: i32,
    pub kills: i64,
    #[serde(default)]
    pub deaths: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodiumResponse {
    pub podium: Vec<PodiumEntry>,
}

/// Builds the podium endpoint URL.
pub fn podium_url(config: &Config) -> String {
    format!("{}podium?serverId={}", config.api_url, config.server_id)
}

/// Issues the podium request and broadcasts the leaderboard when the
/// response arrives. Returns immediately.
pub fn fetch(config: &Config, requester: &dyn WebRequester, chat: Arc<dyn ChatSink>) {
    let url = podium_url(config);
    requester.enqueue_get(
        &url,
        Box::new(move |status, body| handle_response(status, body, chat.as_ref())),
    );
}

/// Completion handler for a podium request. Same silent-failure policy as
/// the stats handler.
pub fn handle_response(status: u16, body: Option<String>, chat: &dyn ChatSink) {
    let body = match body {
        Some(b) if status == 200 && !b.is_empty() => b,
        _ => {
            log::warn!("Couldn't get an answer from the statistics collector");
            return;
        }
    };

    let podium: PodiumResponse = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(err) => {
            log::warn!("Undecodable podium response: {}", err);
            return;
        }
    };

    chat.broadcast(&render(&podium));
}

/// Builds the leaderboard report: header, then one line per entry in
/// received order. Ranks come from the collector and are never re-sorted.
pub fn render(podium: &PodiumResponse) -> String {
    let mut msg = String::from("<color=red>TOP KILLERS</color>\n");
    for entry in &podium.podium {
        msg += &format!(
            "{}. <color=red>{}</color> ({} kills)\n",
            entry.podium_position, entry.name, entry.kills
        );
    }
    msg
}
