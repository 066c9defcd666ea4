//! Assistant trait and the simulated implementation.
//!
//! Backends:
//!   SimulatedAssistant: fixed delay + canned templates, no inference
//!
//! A networked backend only needs to implement `Assistant`; conversations
//! and pages stay unchanged.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Produce the reply text for one user prompt.
    async fn reply(&self, prompt: &str) -> Result<String, AssistantError>;
    /// Message shown before the user has said anything.
    fn greeting(&self) -> String;
    fn name(&self) -> &str;
}

// ── Simulated backend ─────────────────────────────────────────────────────────

/// Which canned script the simulated assistant follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persona {
    /// General research helper on the dashboard.
    ResearchDesk,
    /// "Chat with PDF" bound to one paper title.
    PaperReader { title: String },
}

pub struct SimulatedAssistant {
    persona: Persona,
    delay: Duration,
}

impl SimulatedAssistant {
    pub fn new(persona: Persona, delay: Duration) -> Self {
        Self { persona, delay }
    }

    pub fn research_desk(delay: Duration) -> Self {
        Self::new(Persona::ResearchDesk, delay)
    }

    pub fn paper_reader(title: impl Into<String>, delay: Duration) -> Self {
        Self::new(Persona::PaperReader { title: title.into() }, delay)
    }

    /// The reply text without the simulated latency.
    pub fn compose(&self, prompt: &str) -> String {
        match &self.persona {
            Persona::ResearchDesk => format!(
                "I've analyzed your question about \"{}\". Based on the latest literature, \
                 I found several relevant papers and can summarize their key findings, \
                 compare methodologies, or draft a literature review section for you.",
                prompt
            ),
            Persona::PaperReader { title } => {
                if prompt.to_lowercase().contains("method") {
                    format!(
                        "\"{}\" uses a systematic review methodology following PRISMA guidelines, \
                         with a meta-analysis of diagnostic accuracy studies. Study selection used \
                         predefined inclusion criteria and two independent reviewers.",
                        title
                    )
                } else {
                    format!(
                        "Regarding \"{}\": this paper reports that machine learning improves \
                         diagnostic accuracy across domains, notably radiology (+15.3%) and \
                         pathology (+12.8%), across 523 studies from 45 countries.",
                        prompt
                    )
                }
            }
        }
    }
}

#[async_trait]
impl Assistant for SimulatedAssistant {
    async fn reply(&self, prompt: &str) -> Result<String, AssistantError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.compose(prompt))
    }

    fn greeting(&self) -> String {
        match &self.persona {
            Persona::ResearchDesk => "Hello! I'm your research assistant. Ask me about papers, \
                                      methods, citations, or let me help you draft a review."
                .to_string(),
            Persona::PaperReader { title } => format!(
                "Hi! I've read \"{}\". Ask me about its methods, findings, or limitations.",
                title
            ),
        }
    }

    fn name(&self) -> &str {
        match self.persona {
            Persona::ResearchDesk => "research-desk",
            Persona::PaperReader { .. } => "paper-reader",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_desk_interpolates_prompt() {
        let a = SimulatedAssistant::research_desk(Duration::ZERO);
        assert!(a.compose("CRISPR off-target effects").contains("\"CRISPR off-target effects\""));
    }

    #[test]
    fn test_paper_reader_matches_method_keyword() {
        let a = SimulatedAssistant::paper_reader("ML in Healthcare", Duration::ZERO);
        let methods = a.compose("What METHODOLOGY did they use?");
        assert!(methods.contains("PRISMA"));
        assert!(methods.contains("ML in Healthcare"));

        let general = a.compose("What are the findings?");
        assert!(!general.contains("PRISMA"));
        assert!(general.contains("What are the findings?"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let a = SimulatedAssistant::research_desk(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        let reply = a.reply("hello").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(reply.contains("hello"));
    }
}
