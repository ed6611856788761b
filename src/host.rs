//! One-way notifications to an embedding host page
//!
//! The game posts `GAME_OVER` and `SCORE_INCREASE` messages to the parent
//! window as JSON. Fire-and-forget: no acknowledgment is expected and a
//! missing host is non-fatal, the notification is simply skipped.

use serde::Serialize;

use crate::sim::GameEvent;

/// Message payload posted to the embedding host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    GameOver { score: u32 },
    ScoreIncrease { score: u32 },
}

impl From<GameEvent> for HostMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::GameOver { score } => HostMessage::GameOver { score },
            GameEvent::ScoreIncrease { score } => HostMessage::ScoreIncrease { score },
        }
    }
}

/// Post a message to the embedding host (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn notify(message: &HostMessage) {
    let Some(window) = web_sys::window() else {
        return;
    };

    // A frameless page is its own parent; that means there is no host
    // and the notification is skipped
    let host = match window.parent() {
        Ok(Some(parent)) if parent != window => parent,
        _ => return,
    };

    let Ok(json) = serde_json::to_string(message) else {
        return;
    };
    if host
        .post_message(&wasm_bindgen::JsValue::from_str(&json), "*")
        .is_err()
    {
        log::debug!("host notification dropped: {}", json);
    }
}

/// Native stub
#[cfg(not(target_arch = "wasm32"))]
pub fn notify(message: &HostMessage) {
    log::debug!("host notification (no host): {:?}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_payload_shape() {
        let json = serde_json::to_string(&HostMessage::GameOver { score: 12 }).unwrap();
        assert_eq!(json, r#"{"type":"GAME_OVER","score":12}"#);
    }

    #[test]
    fn test_score_increase_payload_shape() {
        let json = serde_json::to_string(&HostMessage::ScoreIncrease { score: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"SCORE_INCREASE","score":3}"#);
    }

    #[test]
    fn test_event_conversion() {
        assert_eq!(
            HostMessage::from(GameEvent::ScoreIncrease { score: 1 }),
            HostMessage::ScoreIncrease { score: 1 }
        );
        assert_eq!(
            HostMessage::from(GameEvent::GameOver { score: 9 }),
            HostMessage::GameOver { score: 9 }
        );
    }
}
