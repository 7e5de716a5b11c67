//! Complete RAG pipeline: Retrieve -> Assemble -> Generate

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::confidence::confidence_from_distance;
use super::context::history_window;
use super::media::select_attachments;
use super::ContextAssembler;
use super::Retriever;
use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::errors::OlgaGptError;
use crate::errors::Result;
use crate::llm::build_rag_prompt;
use crate::llm::format_links;
use crate::llm::prompts::OLGAGPT_SYSTEM_PROMPT;
use crate::llm::ChatMessage;
use crate::llm::ChatModel;
use crate::llm::CompletionParams;
use crate::models::Attachments;
use crate::models::HistoryMessage;
use crate::models::MediaRule;
use crate::store::KnowledgeStore;

/// Answer to one chat turn
#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub reply: String,
    pub sources: Vec<String>,
    /// Confidence percentage per source, same order as `sources`
    pub confidence: Vec<u8>,
    pub distances: Vec<f32>,
    pub tokens_used: u32,
    pub attachments: Attachments,
    pub is_fallback: bool,
}

impl RagAnswer {
    fn fallback(reply: String, attachments: Attachments) -> Self {
        Self {
            reply,
            sources: Vec::new(),
            confidence: Vec::new(),
            distances: Vec::new(),
            tokens_used: 0,
            attachments,
            is_fallback: true,
        }
    }

    /// Confidence of the best-matching source
    #[must_use]
    pub fn top_confidence(&self) -> Option<u8> {
        self.confidence.first().copied()
    }
}

/// Complete RAG service
pub struct RagService {
    retriever: Retriever,
    context_assembler: ContextAssembler,
    llm: Arc<dyn ChatModel>,
    params: CompletionParams,
    history_window: usize,
    media_rules: Vec<MediaRule>,
    fallback_reply: String,
    timeout: Duration,
}

impl RagService {
    /// Wire the pipeline from configuration and existing services
    #[must_use]
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn KnowledgeStore>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            retriever: Retriever::new(store, embedder, config.rag.top_k, config.rag.max_sources),
            context_assembler: ContextAssembler::new(config.rag.source_excerpt_chars),
            llm,
            params: CompletionParams {
                max_tokens: config.llm.max_tokens,
                temperature: config.llm.temperature,
            },
            history_window: config.rag.history_window,
            media_rules: config.media.rules.clone(),
            fallback_reply: config.rag.fallback_reply.clone(),
            timeout: config.request_timeout(),
        }
    }

    /// Answer a question with retrieval over the knowledge base
    ///
    /// # Errors
    /// - Embedding errors for the question
    /// - Knowledge store read errors
    /// - Chat completion errors (API failures, empty responses)
    pub async fn answer(&self, message: &str, history: &[HistoryMessage]) -> Result<RagAnswer> {
        let started = Instant::now();
        info!("Processing RAG query: {}", message);

        debug!("Step 1: Retrieving chunks");
        let results = self.retriever.retrieve(message).await?;

        debug!("Step 2: Assembling context from {} sources", results.len());
        let context = self.context_assembler.assemble(&results);

        debug!("Step 3: Generating reply");
        let mut messages = Vec::with_capacity(self.history_window + 2);
        messages.push(ChatMessage::system(OLGAGPT_SYSTEM_PROMPT));
        messages.extend(
            history_window(history, self.history_window)
                .iter()
                .map(|m| ChatMessage::new(m.role, m.content.clone())),
        );
        messages.push(ChatMessage::user(build_rag_prompt(&context, message)));

        let completion = self.llm.complete(&messages, self.params).await?;

        let answer = RagAnswer {
            reply: format_links(completion.content.trim()),
            sources: results.iter().map(|r| r.source().to_string()).collect(),
            confidence: results
                .iter()
                .map(|r| confidence_from_distance(r.distance))
                .collect(),
            distances: results.iter().map(|r| r.distance).collect(),
            tokens_used: completion.tokens_used,
            attachments: select_attachments(&self.media_rules, message),
            is_fallback: false,
        };

        info!(
            "RAG query answered in {:?}: sources={:?}, confidence={:?}",
            started.elapsed(),
            answer.sources,
            answer.confidence
        );
        Ok(answer)
    }

    /// [`Self::answer`] bounded by the request timeout, degrading to the
    /// fallback reply on any failure
    pub async fn answer_or_fallback(&self, message: &str, history: &[HistoryMessage]) -> RagAnswer {
        let outcome = tokio::time::timeout(self.timeout, self.answer(message, history))
            .await
            .unwrap_or_else(|_| {
                Err(OlgaGptError::Custom(format!(
                    "RAG query timed out after {:?}",
                    self.timeout
                )))
            });

        match outcome {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Falling back to static reply: {}", e);
                RagAnswer::fallback(
                    self.fallback_reply.clone(),
                    select_attachments(&self.media_rules, message),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::Completion;
    use crate::models::DocumentChunk;
    use crate::models::ImageAttachment;
    use crate::models::Role;
    use crate::store::MemoryStore;

    struct FixedEmbedder;

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[derive(Default)]
    struct RecordingModel {
        fail: bool,
        delay: Option<Duration>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _params: CompletionParams,
        ) -> Result<Completion> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(OlgaGptError::LlmError("boom".to_string()));
            }
            *self.seen.lock().unwrap() = messages.to_vec();
            Ok(Completion {
                content: " See https://example.com. ".to_string(),
                tokens_used: 42,
            })
        }
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_chunks(vec![
            DocumentChunk::new("Leadership story.".into(), "leadership.md".into(), 0, 1, vec![1.0, 0.0]),
            DocumentChunk::new("GenAI work.".into(), "genai.md".into(), 0, 1, vec![0.0, 1.0]),
        ]))
    }

    fn service(model: Arc<RecordingModel>, config: &AppConfig) -> RagService {
        RagService::from_config(config, store(), Arc::new(FixedEmbedder), model)
    }

    #[tokio::test]
    async fn test_answer_builds_prompt_and_scores_sources() {
        let model = Arc::new(RecordingModel::default());
        let rag = service(model.clone(), &AppConfig::default());

        let history = vec![
            HistoryMessage::user("q1"),
            HistoryMessage::assistant("a1"),
            HistoryMessage::user("q2"),
            HistoryMessage::assistant("a2"),
        ];
        let answer = rag.answer("Tell me about leadership", &history).await.unwrap();

        assert_eq!(answer.reply, "See [https://example.com](https://example.com).");
        assert_eq!(answer.sources, vec!["leadership.md", "genai.md"]);
        assert_eq!(answer.confidence, vec![100, 70]);
        assert_eq!(answer.tokens_used, 42);
        assert!(!answer.is_fallback);

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[1].content, "a1");
        assert!(seen[4].content.contains("[Source 1]: Leadership story...."));
        assert!(seen[4].content.contains("Tell me about leadership"));
    }

    #[tokio::test]
    async fn test_answer_propagates_llm_error() {
        let model = Arc::new(RecordingModel {
            fail: true,
            ..RecordingModel::default()
        });
        let rag = service(model, &AppConfig::default());
        assert!(rag.answer("hi", &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_fallback_on_error_keeps_attachments() {
        let mut config = AppConfig::default();
        config.media.rules = vec![MediaRule {
            keywords: vec!["team".to_string()],
            image: Some(ImageAttachment {
                src: "/team.jpg".to_string(),
                alt: "Team".to_string(),
                caption: None,
            }),
            ..MediaRule::default()
        }];
        let model = Arc::new(RecordingModel {
            fail: true,
            ..RecordingModel::default()
        });
        let rag = service(model, &config);

        let answer = rag.answer_or_fallback("my team", &[]).await;
        assert!(answer.is_fallback);
        assert_eq!(answer.reply, config.rag.fallback_reply);
        assert!(answer.sources.is_empty());
        assert!(answer.top_confidence().is_none());
        assert!(answer.attachments.image.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_on_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 1;
        let model = Arc::new(RecordingModel {
            delay: Some(Duration::from_secs(5)),
            ..RecordingModel::default()
        });
        let rag = service(model, &config);

        let answer = rag.answer_or_fallback("hi", &[]).await;
        assert!(answer.is_fallback);
    }
}
