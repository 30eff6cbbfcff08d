// Export commands - hand the current text to an AI chat in the browser
// Read-only: nothing here touches the entry store

use urlencoding::encode;

const CHATGPT_PROMPT: &str = "You are an AI assistant. The user has provided the following text. Please analyze it and provide helpful feedback, suggestions, or insights. Focus on clarity, flow, and potential areas for expansion or refinement.";
const CLAUDE_PROMPT: &str = "Analyze the following text and provide constructive feedback. Consider the writing style, clarity, potential improvements, and interesting themes or ideas present.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatService {
    ChatGpt,
    Claude,
}

impl ChatService {
    fn base_url(&self) -> &'static str {
        match self {
            Self::ChatGpt => "https://chat.openai.com/?m=",
            Self::Claude => "https://claude.ai/new?q=",
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            Self::ChatGpt => CHATGPT_PROMPT,
            Self::Claude => CLAUDE_PROMPT,
        }
    }
}

/// URL that opens a chat prefilled with the prompt and the entry text.
/// None when there is nothing to send.
pub fn chat_url(service: ChatService, text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let full_text = format!("{}\n\n{}", service.prompt(), trimmed);
    Some(format!("{}{}", service.base_url(), encode(&full_text)))
}
