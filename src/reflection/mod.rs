// Reflection — generate → critique → revise orchestration
//
// This module drives quill's refinement runs: it generates an initial
// artifact, then alternates persona critique and revision calls for a
// caller-fixed number of cycles, threading state through an explicit
// `RunState` value.

pub mod loop_runner;
pub mod prompts;
pub mod types;

pub use loop_runner::ReflectionLoop;
pub use types::{
    ArtifactKind, Language, ModelId, Persona, Quality, RefinementConfig, RunPhase, RunState,
    TaskSpec, Tone, MAX_STEPS, MIN_STEPS,
};
