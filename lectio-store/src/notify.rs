use tracing::{error, info};

/// Sends notifications through the Telegram Bot API.
///
/// Delivery is best-effort: failures are logged and swallowed so that a
/// Telegram outage can never fail a booking or a status change.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    enabled: bool,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, enabled: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token,
            enabled,
        }
    }

    /// A notifier that drops every message; used in tests and when the
    /// telegram section of the config is switched off.
    pub fn disabled() -> Self {
        Self::new(String::new(), false)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) {
        if !self.enabled {
            return;
        }

        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let result = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": text,
            }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Sent Telegram notification to chat {}", chat_id);
            }
            Ok(response) => {
                error!(
                    "Telegram API returned {} for chat {}",
                    response.status(),
                    chat_id
                );
            }
            Err(e) => {
                error!("Failed to send Telegram notification to chat {}: {}", chat_id, e);
            }
        }
    }
}
