use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::detect::LanguageDetector;
use super::interface::{Provider, TranslateError, TranslationRequest, TranslationResponse};
use super::pool::{BalanceStrategy, EndpointPool};
use super::transport::{TranslateTransport, WirePayload};

/// The language every pivot translation is anchored on. Pairs that do not
/// touch it are synthesized from two hops, and it is also the fallback
/// source language when detection finds no match.
const PIVOT_LANG: &str = "en";

/// Pooled translation provider speaking the MTranServer wire protocol.
///
/// A request fans out over a fixed endpoint pool with per-call failover:
/// every endpoint is tried at most once, the first success wins, and the
/// call fails only once the pool is exhausted. `from: "auto"` resolves
/// through the language detector, and language pairs that do not involve
/// English are translated through an English pivot hop.
pub struct MTranProvider {
    pool: Arc<EndpointPool>,
    transport: Arc<dyn TranslateTransport>,
    detector: Arc<dyn LanguageDetector>,
}

impl MTranProvider {
    pub fn new(
        endpoints: Vec<String>,
        strategy: BalanceStrategy,
        transport: Arc<dyn TranslateTransport>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Result<Self, TranslateError> {
        let pool = Arc::new(EndpointPool::new(endpoints, strategy)?);
        info!(
            "Initialized MTranProvider: {} endpoints, strategy={:?}",
            pool.len(),
            strategy
        );
        Ok(Self {
            pool,
            transport,
            detector,
        })
    }

    /// Resolve the effective source language.
    ///
    /// Returns `(effective_from, detected)`; `detected` stays `None` when
    /// the caller pinned the source language or detection found no match,
    /// in which case the effective source falls back to English.
    fn resolve_source(&self, from: &str, text: &str) -> (String, Option<String>) {
        if from != "auto" {
            return (from.to_string(), None);
        }
        match self.detector.detect(text) {
            Some(code) => (code.clone(), Some(code)),
            None => (PIVOT_LANG.to_string(), None),
        }
    }

    /// One translation hop: try endpoints until one succeeds or every
    /// endpoint has been attempted.
    async fn call_endpoints(
        &self,
        from: &str,
        to: &str,
        text: &str,
    ) -> Result<TranslationResponse, TranslateError> {
        let mut attempted = vec![false; self.pool.len()];
        let mut attempts = 0;
        let mut last_err = None;

        while let Some(guard) = self.pool.acquire(&attempted) {
            attempted[guard.index()] = true;
            attempts += 1;

            let payload = WirePayload { from, to, text };
            match self.transport.post(guard.address(), payload).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    warn!("endpoint {} failed: {}", guard.address(), err);
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(last) => Err(TranslateError::Exhausted {
                attempts,
                last: Box::new(last),
            }),
            // The pool is non-empty by construction, so at least one attempt ran.
            None => Err(TranslateError::Config(
                "endpoint pool is empty".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Provider for MTranProvider {
    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        let (from, detected) = self.resolve_source(&request.from, &request.text);

        // Upstream instances are only trusted for pairs involving English;
        // anything else is composed from two English-anchored hops.
        let needs_pivot = request.to != PIVOT_LANG && from != PIVOT_LANG;

        let result = if needs_pivot {
            let intermediate = self
                .call_endpoints(&from, PIVOT_LANG, &request.text)
                .await
                .map_err(|err| TranslateError::PivotHop(Box::new(err)))?;
            self.call_endpoints(PIVOT_LANG, &request.to, &intermediate.result)
                .await?
        } else {
            self.call_endpoints(&from, &request.to, &request.text)
                .await?
        };

        Ok(TranslationResponse {
            detected_source_lang: detected,
            result: result.result,
        })
    }
}
