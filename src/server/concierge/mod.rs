//! The chat concierge: answers customer messages about the menu and turns them into
//! order intents.
//!
//! With a Gemini API key the message is answered by the language model. Structured JSON
//! answers are used as they are; free-text answers go through the keyword rules in
//! [`keywords`]. Without a key the concierge answers offline from the same rules.

pub mod gemini;
pub mod keywords;
pub mod prompt;

#[cfg(test)]
mod test;

use crate::server::{
    config::Config,
    error::gemini::GeminiError,
    model::{cafe::CafeInfo, chat::ChatMessage, chat::ConciergeReply, menu::Menu},
};

use self::gemini::GeminiClient;

#[derive(Clone)]
pub struct Concierge {
    gemini: Option<GeminiClient>,
    cafe: CafeInfo,
}

impl Concierge {
    pub fn new(gemini: Option<GeminiClient>, cafe: CafeInfo) -> Self {
        Self { gemini, cafe }
    }

    /// Builds the concierge from configuration, going offline when no API key is set.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Result<Self, GeminiError> {
        let gemini = match &config.gemini_api_key {
            Some(key) => Some(GeminiClient::new(
                http,
                &config.gemini_base_url,
                &config.gemini_model,
                key.clone(),
            )?),
            None => {
                tracing::warn!("GEMINI_API_KEY not set, chat concierge runs offline");
                None
            }
        };

        let cafe = CafeInfo {
            name: config.cafe_name.clone(),
            address: config.cafe_address.clone(),
            phone: config.cafe_phone.clone(),
        };

        Ok(Self::new(gemini, cafe))
    }

    pub fn cafe(&self) -> &CafeInfo {
        &self.cafe
    }

    /// Answers `message` given the session history (oldest first) and orderable menus.
    pub async fn respond(
        &self,
        message: &str,
        history: &[ChatMessage],
        menus: &[Menu],
    ) -> Result<ConciergeReply, GeminiError> {
        let Some(gemini) = &self.gemini else {
            return Ok(keywords::offline_reply(&self.cafe, message, menus));
        };

        let prompt = prompt::full_prompt(&self.cafe, menus, history, message);
        let text = gemini.generate(&prompt).await?;

        Ok(keywords::parse_reply(message, &text, menus))
    }
}
