//! Research engine: the async orchestrator tying the pipeline together.
//!
//! One `analyze` call runs the full flow: admission through the session
//! guard, prompt composition over the protocol corpus, the grounded model
//! call on a blocking worker thread, reconciliation of the raw response,
//! and token-gated publication of the outcome. A cosmetic progress
//! narrator runs alongside the model call and is forwarded to the
//! session's progress channel.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::corpus::ProtocolCorpus;
use crate::models::ResearchReport;
use crate::pipeline::{
    compose_prompt, reconcile_report, report_schema, AnalysisError, ModelClient, ModelResponse,
    ProgressNarrator,
};
use crate::session::AnalysisSession;

/// Deep-research engine over a fixed protocol corpus.
pub struct ResearchEngine {
    client: Arc<dyn ModelClient + Send + Sync>,
    corpus: ProtocolCorpus,
    config: EngineConfig,
}

impl ResearchEngine {
    pub fn new(client: Arc<dyn ModelClient + Send + Sync>, config: EngineConfig) -> Self {
        Self {
            client,
            corpus: ProtocolCorpus::builtin(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one full analysis for `query`, publishing the outcome into
    /// `session`.
    ///
    /// Refused with `AlreadyInFlight` if the session has an outstanding
    /// request. If the session abandons the request mid-flight, the
    /// result is computed but discarded, and the returned report should
    /// be treated the same way (the `bool` in the session publication
    /// already was `false`).
    pub async fn analyze(
        &self,
        session: &AnalysisSession,
        query: &str,
    ) -> Result<ResearchReport, AnalysisError> {
        // Composition validates the query, so failures here leave the
        // session untouched.
        let prompt = compose_prompt(
            query,
            &self.corpus,
            &report_schema(),
            &self.config.output_language,
        )?;

        let token = session
            .begin(query)
            .ok_or_else(|| AnalysisError::AlreadyInFlight(query.trim().to_owned()))?;

        info!(query = query.trim(), prompt_len = prompt.len(), "analysis started");

        let narrator = ProgressNarrator::spawn(self.config.narrator_step());
        let forward = spawn_progress_forwarder(&narrator, session);

        let outcome = self.invoke_model(prompt).await;

        let result = match outcome {
            Ok(response) => {
                info!(
                    response_len = response.text.len(),
                    citations = response.citations.len(),
                    "model responded"
                );
                reconcile_report(&response.text, &response.citations)
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(report) => {
                narrator.finish().await;
                let _ = forward.await;
                if !session.apply_report(token, report.clone()) {
                    warn!(query = query.trim(), "session abandoned before completion");
                }
                Ok(report)
            }
            Err(err) => {
                narrator.abandon().await;
                let _ = forward.await;
                warn!(query = query.trim(), error = %err, "analysis failed");
                session.apply_failure(token, err.to_string());
                Err(err)
            }
        }
    }

    /// Run the blocking model call off the async runtime.
    async fn invoke_model(&self, prompt: String) -> Result<ModelResponse, AnalysisError> {
        let client = Arc::clone(&self.client);
        let joined = tokio::task::spawn_blocking(move || client.generate(&prompt, true)).await;
        match joined {
            Ok(result) => result.map_err(AnalysisError::from),
            Err(join_err) => Err(AnalysisError::Upstream(
                crate::pipeline::ModelError::Transport(join_err.to_string()),
            )),
        }
    }
}

/// Mirror narrator updates into the session's progress channel. The task
/// ends when the narrator's channel closes.
fn spawn_progress_forwarder(
    narrator: &ProgressNarrator,
    session: &AnalysisSession,
) -> tokio::task::JoinHandle<()> {
    let mut updates = narrator.subscribe();
    let session = session.clone();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let update = updates.borrow().clone();
            session.publish_progress(update);
        }
    })
}
