// Reflection run types — task spec, refinement config, run state

use clap::ValueEnum;

use crate::errors::{Error, Result};
use crate::groq::{Conversation, Message};

/// Reflection step bounds (the original deployment's slider range).
pub const MIN_STEPS: u32 = 1;
pub const MAX_STEPS: u32 = 5;

/// Supported Groq-hosted models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelId {
    #[value(name = "llama3-70b-8192")]
    Llama3_70b,
    #[value(name = "mixtral-8x7b-32768")]
    Mixtral8x7b,
    #[value(name = "gemma-7b-it")]
    Gemma7b,
}

impl ModelId {
    /// Wire name sent to the completion service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Llama3_70b => "llama3-70b-8192",
            ModelId::Mixtral8x7b => "mixtral-8x7b-32768",
            ModelId::Gemma7b => "gemma-7b-it",
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::Llama3_70b
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of artifact a run refines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Code,
    MarketingContent,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Code => "code",
            ArtifactKind::MarketingContent => "marketing content",
        }
    }
}

/// Target language for code tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Python,
    Javascript,
    Java,
    Cpp,
}

impl Language {
    pub fn display(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Javascript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
        }
    }

    /// Markdown fence tag for embedding artifacts in prompts.
    pub fn fence(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Javascript => "js",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

/// Requested quality level for code tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    Production,
    Prototype,
    Educational,
}

impl Quality {
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Production => "production",
            Quality::Prototype => "prototype",
            Quality::Educational => "educational",
        }
    }
}

/// Requested tone for marketing content tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tone {
    Inspirational,
    Professional,
    Casual,
    Urgent,
    Educational,
}

impl Tone {
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Inspirational => "inspirational",
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
            Tone::Educational => "educational",
        }
    }
}

/// A named critique viewpoint used to frame the critique system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Persona {
    AiExpert,
    SeniorEngineer,
    PythonGuru,
    ContentStrategist,
}

impl Persona {
    /// Selector label shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::AiExpert => "Andrej Karpathy (AI Expert)",
            Persona::SeniorEngineer => "Senior Software Engineer",
            Persona::PythonGuru => "Python Guru",
            Persona::ContentStrategist => "Darren Rowse (Content Strategist)",
        }
    }

    /// The "You are ..." clause opening the critique system prompt.
    pub fn intro(&self) -> &'static str {
        match self {
            Persona::AiExpert => "Andrej Karpathy, an experienced computer scientist",
            Persona::SeniorEngineer => {
                "a senior software engineer with 15+ years of production experience"
            }
            Persona::PythonGuru => "a Python guru known for ruthlessly idiomatic code",
            Persona::ContentStrategist => {
                "Darren Rowse, veteran content strategist with 15+ years experience"
            }
        }
    }

    pub fn default_for(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::Code => Persona::AiExpert,
            ArtifactKind::MarketingContent => Persona::ContentStrategist,
        }
    }
}

/// Per-kind task inputs supplied by the caller.
#[derive(Debug, Clone)]
pub enum TaskSpec {
    Code {
        task: String,
        language: Language,
        quality: Quality,
    },
    Content {
        topic: String,
        features: Vec<String>,
        audience: String,
        tone: Tone,
    },
}

impl TaskSpec {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            TaskSpec::Code { .. } => ArtifactKind::Code,
            TaskSpec::Content { .. } => ArtifactKind::MarketingContent,
        }
    }

    pub fn language(&self) -> Option<Language> {
        match self {
            TaskSpec::Code { language, .. } => Some(*language),
            TaskSpec::Content { .. } => None,
        }
    }

    /// Reject empty task/topic before any request is built.
    pub fn validate(&self) -> Result<()> {
        match self {
            TaskSpec::Code { task, .. } if task.trim().is_empty() => Err(Error::Validation(
                "coding task must not be empty".to_string(),
            )),
            TaskSpec::Content { topic, .. } if topic.trim().is_empty() => Err(Error::Validation(
                "content topic must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Immutable configuration for one refinement run.
#[derive(Debug, Clone)]
pub struct RefinementConfig {
    /// Model used for generation and revision calls.
    pub model: ModelId,
    /// Model used for critique calls; may differ from `model`.
    pub critique_model: ModelId,
    /// Number of critique+revision cycles, 1..=5. Fixed for the run.
    pub steps: u32,
    pub persona: Persona,
    /// Sampling temperature for generation/revision, in [0, 1].
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            critique_model: ModelId::default(),
            steps: 3,
            persona: Persona::AiExpert,
            temperature: 0.2,
            max_output_tokens: 2048,
        }
    }
}

impl RefinementConfig {
    pub fn validate(&self) -> Result<()> {
        if self.steps < MIN_STEPS || self.steps > MAX_STEPS {
            return Err(Error::Validation(format!(
                "reflection steps must be between {} and {}, got {}",
                MIN_STEPS, MAX_STEPS, self.steps
            )));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::Validation(format!(
                "temperature must be within [0.0, 1.0], got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(Error::Validation(
                "max output tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a run currently is in its critique/revision lifecycle.
///
/// A run only exists once initial generation has succeeded, so the first
/// observable phase is `Critiquing`. A failed call leaves the phase where
/// the run halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Critiquing,
    Revising,
    Done,
}

/// Mutable record of one reflection run.
///
/// Read accessors are public; mutators are crate-private and invoked
/// exclusively by the loop controller, once per step. The caller only
/// reads this state for display and export.
#[derive(Debug, Clone)]
pub struct RunState {
    kind: ArtifactKind,
    phase: RunPhase,
    current_artifact: String,
    latest_critique: Option<String>,
    revision_history: Vec<String>,
    conversation: Conversation,
    step_index: u32,
    steps: u32,
}

impl RunState {
    /// Seed a run from a successful initial generation.
    ///
    /// The conversation transcript starts as the generation request plus
    /// the assistant's artifact reply, and only ever grows from there.
    pub(crate) fn new(
        kind: ArtifactKind,
        generation_request: Vec<Message>,
        artifact: String,
        steps: u32,
    ) -> Self {
        let mut conversation = Conversation::from_messages(generation_request);
        conversation.push(Message::assistant(artifact.clone()));
        Self {
            kind,
            phase: RunPhase::Critiquing,
            current_artifact: artifact.clone(),
            latest_critique: None,
            revision_history: vec![artifact],
            conversation,
            step_index: 0,
            steps,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    pub fn current_artifact(&self) -> &str {
        &self.current_artifact
    }

    pub fn latest_critique(&self) -> Option<&str> {
        self.latest_critique.as_deref()
    }

    pub fn revision_history(&self) -> &[String] {
        &self.revision_history
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Completed critique+revision cycles so far.
    pub fn step_index(&self) -> u32 {
        self.step_index
    }

    /// Total cycles this run will perform.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub(crate) fn record_critique(&mut self, prompt: Message, critique: String) {
        self.conversation.push(prompt);
        self.conversation.push(Message::assistant(critique.clone()));
        self.latest_critique = Some(critique);
        self.phase = RunPhase::Revising;
    }

    pub(crate) fn record_revision(&mut self, prompt: Message, artifact: String) {
        self.conversation.push(prompt);
        self.conversation.push(Message::assistant(artifact.clone()));
        self.revision_history.push(artifact.clone());
        self.current_artifact = artifact;
        self.step_index += 1;
        self.phase = if self.step_index >= self.steps {
            RunPhase::Done
        } else {
            RunPhase::Critiquing
        };
    }

    /// Record the one-shot finalization pass; does not advance the cycle.
    pub(crate) fn record_finalization(&mut self, prompt: Message, artifact: String) {
        self.conversation.push(prompt);
        self.conversation.push(Message::assistant(artifact.clone()));
        self.revision_history.push(artifact.clone());
        self.current_artifact = artifact;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_spec() -> TaskSpec {
        TaskSpec::Code {
            task: "implement binary search".to_string(),
            language: Language::Python,
            quality: Quality::Production,
        }
    }

    #[test]
    fn test_model_wire_names() {
        assert_eq!(ModelId::Llama3_70b.as_str(), "llama3-70b-8192");
        assert_eq!(ModelId::Mixtral8x7b.as_str(), "mixtral-8x7b-32768");
        assert_eq!(ModelId::Gemma7b.as_str(), "gemma-7b-it");
    }

    #[test]
    fn test_config_defaults_are_valid() {
        assert!(RefinementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_steps() {
        let config = RefinementConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_config_rejects_excess_steps() {
        let config = RefinementConfig {
            steps: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_out_of_range_temperature() {
        let config = RefinementConfig {
            temperature: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RefinementConfig {
            temperature: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_max_tokens() {
        let config = RefinementConfig {
            max_output_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_task_spec_rejects_empty_task() {
        let spec = TaskSpec::Code {
            task: "   ".to_string(),
            language: Language::Python,
            quality: Quality::Production,
        };
        assert!(matches!(spec.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_task_spec_rejects_empty_topic() {
        let spec = TaskSpec::Content {
            topic: String::new(),
            features: vec!["non-slip".to_string()],
            audience: "millennials".to_string(),
            tone: Tone::Inspirational,
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_default_persona_per_kind() {
        assert_eq!(
            Persona::default_for(ArtifactKind::Code),
            Persona::AiExpert
        );
        assert_eq!(
            Persona::default_for(ArtifactKind::MarketingContent),
            Persona::ContentStrategist
        );
    }

    #[test]
    fn test_run_state_seeds_history_and_transcript() {
        let request = vec![
            Message::system("You are an expert Python developer."),
            Message::user("implement binary search"),
        ];
        let state = RunState::new(code_spec().kind(), request, "v0".to_string(), 2);

        assert_eq!(state.current_artifact(), "v0");
        assert_eq!(state.revision_history(), &["v0".to_string()]);
        assert_eq!(state.step_index(), 0);
        assert_eq!(state.phase(), RunPhase::Critiquing);
        assert!(state.latest_critique().is_none());
        // system + user + assistant artifact
        assert_eq!(state.conversation().len(), 3);
    }

    #[test]
    fn test_record_critique_then_revision_advances_phase() {
        let request = vec![Message::system("s"), Message::user("t")];
        let mut state = RunState::new(ArtifactKind::Code, request, "v0".to_string(), 2);

        state.record_critique(Message::user("review v0"), "needs docs".to_string());
        assert_eq!(state.phase(), RunPhase::Revising);
        assert_eq!(state.latest_critique(), Some("needs docs"));

        state.record_revision(Message::user("revise v0"), "v1".to_string());
        assert_eq!(state.phase(), RunPhase::Critiquing);
        assert_eq!(state.step_index(), 1);
        assert_eq!(state.current_artifact(), "v1");
        assert_eq!(state.revision_history().len(), 2);

        state.record_critique(Message::user("review v1"), "tighter".to_string());
        state.record_revision(Message::user("revise v1"), "v2".to_string());
        assert!(state.is_done());
        assert_eq!(state.revision_history().len(), 3);
    }

    #[test]
    fn test_transcript_grows_monotonically() {
        let request = vec![Message::system("s"), Message::user("t")];
        let mut state = RunState::new(ArtifactKind::Code, request, "v0".to_string(), 1);
        let before = state.conversation().len();

        state.record_critique(Message::user("review"), "c1".to_string());
        let after_critique = state.conversation().len();
        assert_eq!(after_critique, before + 2);

        state.record_revision(Message::user("revise"), "v1".to_string());
        assert_eq!(state.conversation().len(), after_critique + 2);
    }

    #[test]
    fn test_record_finalization_keeps_cycle_counters() {
        let request = vec![Message::system("s"), Message::user("t")];
        let mut state = RunState::new(ArtifactKind::Code, request, "v0".to_string(), 1);
        state.record_critique(Message::user("review"), "c1".to_string());
        state.record_revision(Message::user("revise"), "v1".to_string());
        assert!(state.is_done());

        state.record_finalization(Message::user("harden"), "v1-final".to_string());
        assert!(state.is_done());
        assert_eq!(state.step_index(), 1);
        assert_eq!(state.current_artifact(), "v1-final");
        assert_eq!(state.revision_history().len(), 3);
    }
}
