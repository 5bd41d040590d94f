// Reflection loop — iterative artifact generation + persona critique + revision

use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::groq::CompletionBackend;
use crate::reflection::prompts;
use crate::reflection::types::{Language, RefinementConfig, RunState, TaskSpec};

// Critique, finalize, and test calls run near-deterministic regardless of
// the configured generation temperature.
const CRITIQUE_TEMPERATURE: f32 = 0.1;
const FINALIZE_TEMPERATURE: f32 = 0.1;
const TEST_GENERATION_TEMPERATURE: f32 = 0.1;
const TEST_GENERATION_MAX_TOKENS: u32 = 1000;

/// The reflection loop.
///
/// Drives a fixed number of critique+revision cycles over an evolving
/// artifact. Strictly sequential: one completion request in flight at a
/// time, and cycle *k+1* always observes the *k*-th revised artifact.
/// There is no early exit on a favorable critique and no retry; a failed
/// call halts the run with `RunState` left at its last successful values.
pub struct ReflectionLoop {
    backend: Arc<dyn CompletionBackend>,
    config: RefinementConfig,
}

impl ReflectionLoop {
    /// Build a loop over a validated configuration.
    pub fn new(backend: Arc<dyn CompletionBackend>, config: RefinementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Produce the initial artifact and seed the run state.
    pub async fn start_generation(&self, spec: &TaskSpec) -> Result<RunState> {
        spec.validate()?;

        let request = prompts::generation_request(spec);
        tracing::info!(kind = spec.kind().label(), "Generating initial artifact");

        let artifact = self
            .backend
            .complete(
                &request,
                self.config.model.as_str(),
                self.config.temperature,
                self.config.max_output_tokens,
            )
            .await?;

        Ok(RunState::new(
            spec.kind(),
            request,
            artifact,
            self.config.steps,
        ))
    }

    /// Run exactly one critique+revision cycle, mutating `state` in place.
    ///
    /// The critique call uses the critique model; the revision call uses the
    /// generation model and consumes that critique verbatim. On failure the
    /// state keeps its last successful artifact and critique, and the error
    /// propagates unmodified.
    pub async fn run_reflection_cycle(&self, spec: &TaskSpec, state: &mut RunState) -> Result<()> {
        if state.is_done() {
            return Err(Error::Validation(
                "reflection run is already complete".to_string(),
            ));
        }

        let step = state.step_index() + 1;
        let artifact = state.current_artifact().to_string();

        tracing::info!(
            step,
            total = state.steps(),
            persona = self.config.persona.display_name(),
            "Requesting critique"
        );
        let request = prompts::critique_request(spec, self.config.persona, &artifact);
        let critique = self
            .backend
            .complete(
                &request,
                self.config.critique_model.as_str(),
                CRITIQUE_TEMPERATURE,
                self.config.max_output_tokens,
            )
            .await?;
        state.record_critique(prompts::critique_turn(spec, &artifact), critique.clone());

        tracing::info!(step, total = state.steps(), "Revising artifact");
        let request = prompts::revision_request(spec, &artifact, &critique);
        let revised = self
            .backend
            .complete(
                &request,
                self.config.model.as_str(),
                self.config.temperature,
                self.config.max_output_tokens,
            )
            .await?;
        state.record_revision(prompts::revision_turn(spec, &artifact, &critique), revised);

        Ok(())
    }

    /// Convenience driver: generate, then run every configured cycle.
    ///
    /// Callers that want partial progress on failure should drive
    /// `start_generation` + `run_reflection_cycle` themselves.
    pub async fn refine(&self, spec: &TaskSpec) -> Result<RunState> {
        let mut state = self.start_generation(spec).await?;
        while !state.is_done() {
            self.run_reflection_cycle(spec, &mut state).await?;
        }
        Ok(state)
    }

    /// One-shot production-hardening pass over the current artifact.
    ///
    /// Code runs only. Caller-triggered, outside the fixed-count loop; a
    /// failure leaves the run's prior results intact.
    pub async fn finalize(&self, spec: &TaskSpec, state: &mut RunState) -> Result<String> {
        let Some(language) = spec.language() else {
            return Err(Error::Validation(
                "finalization applies to code runs only".to_string(),
            ));
        };

        let artifact = state.current_artifact().to_string();
        tracing::info!("Applying production refinement");

        let request = prompts::finalization_request(language, &artifact);
        let finalized = self
            .backend
            .complete(
                &request,
                self.config.model.as_str(),
                FINALIZE_TEMPERATURE,
                self.config.max_output_tokens,
            )
            .await?;
        state.record_finalization(
            prompts::finalization_turn(language, &artifact),
            finalized.clone(),
        );

        Ok(finalized)
    }

    /// One-shot edge-case test generation for an artifact.
    ///
    /// Independent of any run state; operates on whatever artifact text the
    /// caller supplies.
    pub async fn generate_tests(&self, artifact: &str, language: Language) -> Result<String> {
        tracing::info!("Generating test cases");
        let request = prompts::test_generation_request(language, artifact);
        self.backend
            .complete(
                &request,
                self.config.model.as_str(),
                TEST_GENERATION_TEMPERATURE,
                TEST_GENERATION_MAX_TOKENS,
            )
            .await
    }
}
