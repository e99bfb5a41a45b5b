//! Pipeline orchestrator: input → candidates → base names → availability → suggestions.

use crate::config::TldSet;
use crate::domain::{assemble_all, normalize_all, AvailabilityResolver};
use crate::error::{DomainPilotError, PipelineError};
use crate::input;
use crate::llm::NameGenerator;
use crate::types::{DomainSuggestion, PipelineInput};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Linear pipeline stages. Any stage may end the run in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Generating,
    Normalizing,
    Resolving,
    Assembling,
    Done,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Validating => write!(f, "validating"),
            PipelineStage::Generating => write!(f, "generating"),
            PipelineStage::Normalizing => write!(f, "normalizing"),
            PipelineStage::Resolving => write!(f, "resolving"),
            PipelineStage::Assembling => write!(f, "assembling"),
            PipelineStage::Done => write!(f, "done"),
        }
    }
}

/// Why a run stopped, before it is reduced to a [`PipelineError`]
#[derive(Debug)]
enum Failure {
    Stage(PipelineStage, DomainPilotError),
    EmptyGeneration { candidates: usize },
    Cancelled(PipelineStage),
}

impl Failure {
    fn into_pipeline_error(self) -> PipelineError {
        match self {
            Failure::Stage(PipelineStage::Validating, DomainPilotError::Validation { message }) => {
                tracing::info!(reason = %message, "Input rejected");
                PipelineError::Validation(message)
            }
            Failure::Stage(PipelineStage::Generating, e) if e.is_upstream() => {
                tracing::warn!(stage = "generating", error = %e, "Name generation failed");
                PipelineError::Generation
            }
            Failure::Stage(stage @ (PipelineStage::Resolving | PipelineStage::Assembling), e)
                if !matches!(e, DomainPilotError::Config { .. } | DomainPilotError::Internal { .. }) =>
            {
                tracing::warn!(stage = %stage, error = %e, "Availability resolution failed");
                PipelineError::Availability
            }
            Failure::Stage(stage, e) => {
                tracing::error!(stage = %stage, error = ?e, "Unexpected pipeline failure");
                PipelineError::Unexpected
            }
            Failure::EmptyGeneration { candidates } => {
                tracing::warn!(candidates = %candidates, "No usable candidate names");
                PipelineError::EmptyGeneration
            }
            Failure::Cancelled(stage) => {
                tracing::info!(stage = %stage, "Pipeline run cancelled");
                PipelineError::Cancelled
            }
        }
    }
}

/// Stateless orchestrator; one instance can serve concurrent runs.
#[derive(Clone)]
pub struct DomainPipeline {
    generator: Arc<dyn NameGenerator>,
    resolver: Arc<dyn AvailabilityResolver>,
}

impl DomainPipeline {
    pub fn new(generator: Arc<dyn NameGenerator>, resolver: Arc<dyn AvailabilityResolver>) -> Self {
        Self { generator, resolver }
    }

    /// TLDs each suggestion will list, in order
    pub fn tlds(&self) -> &TldSet {
        self.resolver.tlds()
    }

    /// Run the whole pipeline to completion
    pub async fn run(&self, input: PipelineInput) -> Result<Vec<DomainSuggestion>, PipelineError> {
        self.run_with_cancellation(input, &CancellationToken::new()).await
    }

    /// Run the pipeline, giving up at the next suspension point once `cancel`
    /// fires. A cancelled run returns no partial results.
    pub async fn run_with_cancellation(
        &self,
        input: PipelineInput,
        cancel: &CancellationToken,
    ) -> Result<Vec<DomainSuggestion>, PipelineError> {
        let span = tracing::info_span!("pipeline", variant = %input.variant(), resolver = self.resolver.name());
        let started = Instant::now();

        let outcome = AssertUnwindSafe(self.execute(&input, cancel))
            .catch_unwind()
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        match outcome {
            Ok(Ok(suggestions)) => {
                tracing::info!(
                    suggestions = %suggestions.len(),
                    duration_ms = %started.elapsed().as_millis(),
                    "Pipeline completed"
                );
                Ok(suggestions)
            }
            Ok(Err(failure)) => Err(failure.into_pipeline_error()),
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!(panic = %detail, "Pipeline stage panicked");
                Err(PipelineError::Unexpected)
            }
        }
    }

    async fn execute(
        &self,
        input: &PipelineInput,
        cancel: &CancellationToken,
    ) -> Result<Vec<DomainSuggestion>, Failure> {
        let mut stage = PipelineStage::Validating;
        tracing::debug!(stage = %stage, "Stage started");
        let target_count = self.generator.target_count(input.variant());
        let request = input::prepare(input, target_count).map_err(|e| Failure::Stage(stage, e))?;

        stage = PipelineStage::Generating;
        tracing::debug!(stage = %stage, target_count = %request.target_count, "Stage started");
        if cancel.is_cancelled() {
            return Err(Failure::Cancelled(stage));
        }
        let candidates = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Failure::Cancelled(stage)),
            result = self.generator.generate(&request) => result.map_err(|e| Failure::Stage(stage, e))?,
        };
        if candidates.is_empty() {
            return Err(Failure::EmptyGeneration { candidates: 0 });
        }

        stage = PipelineStage::Normalizing;
        tracing::debug!(stage = %stage, candidates = %candidates.len(), "Stage started");
        let base_names = normalize_all(&candidates, self.resolver.tlds());
        if base_names.is_empty() {
            return Err(Failure::EmptyGeneration {
                candidates: candidates.len(),
            });
        }

        stage = PipelineStage::Resolving;
        tracing::debug!(stage = %stage, base_names = %base_names.len(), "Stage started");
        if cancel.is_cancelled() {
            return Err(Failure::Cancelled(stage));
        }
        let availability = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Failure::Cancelled(stage)),
            result = self.resolver.resolve(&base_names) => result.map_err(|e| Failure::Stage(stage, e))?,
        };

        stage = PipelineStage::Assembling;
        tracing::debug!(stage = %stage, "Stage started");
        let suggestions =
            assemble_all(&base_names, availability, self.resolver.tlds()).map_err(|e| Failure::Stage(stage, e))?;

        tracing::debug!(stage = %PipelineStage::Done, "Stage started");
        Ok(suggestions)
    }
}
