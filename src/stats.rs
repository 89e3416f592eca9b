//! Per-player statistics: fetch, decode, render, reply.
//!
//! The collector owns all aggregation; this module trusts its response
//! verbatim (KDR strings, percentages, distances are never recomputed
//! locally) and only reformats the first-seen timestamp.

use chrono::{Local, TimeZone};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::engine::CommandSource;
use crate::webrequest::WebRequester;

/// A response field whose upstream type is not pinned down: the collector
/// sends strings for some servers and bare numbers for others. Rendered
/// verbatim either way.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LooseField {
    Text(String),
    Number(f64),
    Other(serde_json::Value),
}

impl fmt::Display for LooseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseField::Text(s) => f.write_str(s),
            LooseField::Number(n) => write!(f, "{}", n),
            LooseField::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Renders an optional loose field; absent fields render empty, the same
/// as a null in the upstream response.
pub(crate) fn render_loose(field: &Option<LooseField>) -> String {
    field.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPlayer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub steam_id: Option<LooseField>,
    pub name: String,
    #[serde(default)]
    pub discord: Option<LooseField>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub creation_date: i64,
    #[serde(default)]
    pub last_join_date: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub player: StatsPlayer,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub wipe_kills: i64,
    #[serde(default)]
    pub wipe_deaths: i64,
    // The collector capitalizes the acronym, which camelCase would not.
    #[serde(rename = "wipeKDR", default)]
    pub wipe_kdr: Option<LooseField>,
    #[serde(default)]
    pub total_kills: i64,
    #[serde(default)]
    pub total_deaths: i64,
    #[serde(rename = "totalKDR", default)]
    pub total_kdr: Option<LooseField>,
    #[serde(default)]
    pub furthest_murder: Option<LooseField>,
    #[serde(default)]
    pub average_headshot: Option<LooseField>,
    #[serde(default)]
    pub most_used_weapon: Option<LooseField>,
}

/// Builds the stats endpoint URL. No escaping: ids are numeric strings.
pub fn stats_url(config: &Config, player_id: &str) -> String {
    format!(
        "{}stats?steamId={}&serverId={}",
        config.api_url, player_id, config.server_id
    )
}

/// Issues the stats request for the source's own id and replies privately
/// when the response arrives. Returns immediately.
pub fn fetch(config: &Config, requester: &dyn WebRequester, source: Arc<dyn CommandSource>) {
    let url = stats_url(config, source.id());
    requester.enqueue_get(
        &url,
        Box::new(move |status, body| handle_response(status, body, source.as_ref())),
    );
}

/// Completion handler for a stats request. Every failure degrades to "no
/// reply was sent": transport errors, non-200 statuses, empty bodies and
/// undecodable payloads are all logged and dropped.
pub fn handle_response(status: u16, body: Option<String>, source: &dyn CommandSource) {
    let body = match body {
        Some(b) if status == 200 && !b.is_empty() => b,
        _ => {
            log::warn!("Couldn't get an answer from the statistics collector");
            return;
        }
    };

    let stats: StatsResponse = match serde_json::from_str(&body) {
        Ok(s) => s,
        Err(err) => {
            log::warn!("Undecodable stats response: {}", err);
            return;
        }
    };

    source.reply(&render(&stats));
}

/// Converts epoch milliseconds to `dd/mm/yyyy hh:mm:ss` in local time.
fn format_first_seen(epoch_millis: i64) -> String {
    match Local.timestamp_millis_opt(epoch_millis).single() {
        Some(time) => time.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}

/// Builds the fixed-order multi-line stats report.
pub fn render(stats: &StatsResponse) -> String {
    let mut msg = format!("Stats for {}:", stats.player.name);
    msg += &format!("\n Total Kills: {}", stats.total_kills);
    msg += &format!("\n Wipe Kills: {}", stats.wipe_kills);
    msg += &format!("\n Total Deaths: {}", stats.total_deaths);
    msg += &format!("\n Wipe Deaths: {}", stats.wipe_deaths);
    msg += &format!("\n Total KDR: {}", render_loose(&stats.total_kdr));
    msg += &format!("\n Wipe KDR: {}", render_loose(&stats.wipe_kdr));
    msg += &format!("\n Average headshot: {}", render_loose(&stats.average_headshot));
    msg += &format!("\n Most used weapon: {}", render_loose(&stats.most_used_weapon));
    msg += &format!("\n Longest kill: {}", render_loose(&stats.furthest_murder));
    msg += &format!(
        "\n First seen in server: {}",
        format_first_seen(stats.player.creation_date)
    );
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CaptureSource {
        replies: Mutex<Vec<String>>,
    }

    impl CaptureSource {
        fn new() -> Self {
            Self {
                replies: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandSource for CaptureSource {
        fn id(&self) -> &str {
            "765001"
        }
        fn name(&self) -> &str {
            "Bob"
        }
        fn reply(&self, message: &str) {
            self.replies.lock().unwrap().push(message.to_string());
        }
        fn has_permission(&self, _perm: &str) -> bool {
            true
        }
    }

    fn sample_body() -> String {
        r#"{
            "player": {
                "id": 7,
                "steamId": 76500100000000,
                "name": "Bob",
                "discord": null,
                "creationDate": 0,
                "lastJoinDate": 1700000000000
            },
            "avatar": "http://example/avatar.png",
            "wipeKills": 2,
            "wipeDeaths": 1,
            "wipeKDR": "2.0",
            "totalKills": 10,
            "totalDeaths": 5,
            "totalKDR": "2.0",
            "furthestMurder": "150m",
            "averageHeadshot": "30%",
            "mostUsedWeapon": "rifle"
        }"#
        .to_string()
    }

    #[test]
    fn test_stats_url() {
        let config = Config {
            api_url: "http://collector:8080/".to_string(),
            server_id: 3,
            server_wipe_id: 1,
        };
        assert_eq!(
            stats_url(&config, "765001"),
            "http://collector:8080/stats?steamId=765001&serverId=3"
        );
    }

    #[test]
    fn test_epoch_renders_in_local_time() {
        let expected = Local
            .timestamp_millis_opt(0)
            .single()
            .unwrap()
            .format("%d/%m/%Y %H:%M:%S")
            .to_string();
        assert_eq!(format_first_seen(0), expected);
    }

    #[test]
    fn test_render_fixed_field_order() {
        let stats: StatsResponse = serde_json::from_str(&sample_body()).unwrap();
        let report = render(&stats);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Stats for Bob:");
        assert_eq!(lines[1], " Total Kills: 10");
        assert_eq!(lines[2], " Wipe Kills: 2");
        assert_eq!(lines[3], " Total Deaths: 5");
        assert_eq!(lines[4], " Wipe Deaths: 1");
        assert_eq!(lines[5], " Total KDR: 2.0");
        assert_eq!(lines[6], " Wipe KDR: 2.0");
        assert_eq!(lines[7], " Average headshot: 30%");
        assert_eq!(lines[8], " Most used weapon: rifle");
        assert_eq!(lines[9], " Longest kill: 150m");
        assert!(lines[10].starts_with(" First seen in server: "));
    }

    #[test]
    fn test_kdr_fields_decode_from_capitalized_acronym() {
        // The wire names are wipeKDR/totalKDR, not wipeKdr/totalKdr; a
        // mismatch would default both to None and render them empty.
        let stats: StatsResponse = serde_json::from_str(&sample_body()).unwrap();
        assert_eq!(render_loose(&stats.total_kdr), "2.0");
        assert_eq!(render_loose(&stats.wipe_kdr), "2.0");
    }

    #[test]
    fn test_loose_fields_accept_numbers() {
        let body = sample_body().replace("\"150m\"", "150.5");
        let stats: StatsResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(render_loose(&stats.furthest_murder), "150.5");
    }

    #[test]
    fn test_null_loose_field_renders_empty() {
        let stats: StatsResponse = serde_json::from_str(&sample_body()).unwrap();
        assert_eq!(render_loose(&stats.player.discord), "");
    }

    #[test]
    fn test_non_200_sends_no_reply() {
        let source = CaptureSource::new();
        handle_response(500, Some(sample_body()), &source);
        assert!(source.replies.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_body_sends_no_reply() {
        let source = CaptureSource::new();
        handle_response(200, Some(String::new()), &source);
        handle_response(200, None, &source);
        assert!(source.replies.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body_sends_no_reply() {
        let source = CaptureSource::new();
        handle_response(200, Some("{not json".to_string()), &source);
        assert!(source.replies.lock().unwrap().is_empty());
    }

    #[test]
    fn test_successful_response_replies_privately() {
        let source = CaptureSource::new();
        handle_response(200, Some(sample_body()), &source);
        let replies = source.replies.lock().unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("Stats for Bob:"));
    }
}
