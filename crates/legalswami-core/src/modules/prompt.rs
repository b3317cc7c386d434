//! Conversation assembly for legal questions.

use legalswami_types::{ChatMessage, Role};

pub const LEGAL_SYSTEM_PROMPT: &str = "You are LegalSwami, an AI legal assistant. \
Provide accurate, helpful legal information. \
Always mention that you are an AI and not a substitute for a real lawyer. \
Be clear, concise, and cite relevant laws where possible.";

/// System prompt, prior turns, then the new question.
///
/// System entries in `history` are dropped so the legal prompt is the only
/// system message and always comes first.
pub fn build_messages(question: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(LEGAL_SYSTEM_PROMPT));
    messages.extend(
        history
            .iter()
            .filter(|m| m.role != Role::System && !m.content.trim().is_empty())
            .cloned(),
    );
    messages.push(ChatMessage::user(question.trim()));
    messages
}
