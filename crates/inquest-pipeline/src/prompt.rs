//! Prompt assembly
//!
//! The template text (instructions, few-shot examples, output-schema
//! description) is opaque configuration; the only contract here is that
//! the final prompt is assembled deterministically, with the user question
//! substituted into the `{question}` placeholder.

use std::path::Path;

use inquest_llm::Message;

/// System message sent ahead of every templated prompt
const SYSTEM_MESSAGE: &str =
    "You are a helpful AI assistant that provides structured, accurate responses.";

/// Built-in fallback template used when no template file is configured
const DEFAULT_TEMPLATE: &str = r#"You are a helpful AI assistant that processes user questions and provides structured responses.

Analyze the user's question and provide a comprehensive answer in the following JSON format:
{
    "question_type": "type of question (e.g., factual, analytical, creative, technical)",
    "answer": "detailed answer to the question",
    "confidence": "high/medium/low",
    "additional_context": "any relevant additional information"
}

User question: {question}"#;

/// A prompt template with a `{question}` placeholder
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template from raw text
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Load a template from a file, falling back to the built-in default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::new(text),
            Err(e) => {
                tracing::warn!(
                    "Prompt template not found at {}, using built-in default: {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Substitute the question into the template
    pub fn render(&self, question: &str) -> String {
        self.template.replace("{question}", question)
    }

    /// Build the message sequence for one inference call
    ///
    /// Fixed order: system instructions, then the templated user prompt
    /// (instructions + examples + question).
    pub fn messages(&self, question: &str) -> Vec<Message> {
        vec![
            Message::system(SYSTEM_MESSAGE),
            Message::user(self.render(question)),
        ]
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquest_llm::MessageRole;

    #[test]
    fn test_render_substitutes_question() {
        let template = PromptTemplate::new("Answer this: {question}");
        assert_eq!(template.render("Why?"), "Answer this: Why?");
    }

    #[test]
    fn test_default_template_has_placeholder() {
        let template = PromptTemplate::default();
        let rendered = template.render("What is the capital of France?");
        assert!(rendered.contains("What is the capital of France?"));
        assert!(!rendered.contains("{question}"));
    }

    #[test]
    fn test_messages_order_is_fixed() {
        let template = PromptTemplate::default();
        let messages = template.messages("test question");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert!(messages[1].content.contains("test question"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = PromptTemplate::default();
        assert_eq!(template.render("q"), template.render("q"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let template = PromptTemplate::load_or_default("no/such/template.txt");
        assert!(template.render("x").contains("question_type"));
    }
}
