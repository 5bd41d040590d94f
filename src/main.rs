// Quill - generate, critique, and refine text artifacts via self-reflection
// Main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use quill::config::load_config;
use quill::errors::Error;
use quill::export;
use quill::groq::GroqClient;
use quill::reflection::{
    Language, ModelId, Persona, Quality, RefinementConfig, ReflectionLoop, TaskSpec, Tone,
};

#[derive(Parser)]
#[command(
    name = "quill",
    version,
    about = "Generate, critique, and refine code or marketing copy through LLM self-reflection"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build, review, and refine a code artifact
    Code {
        /// The coding task to implement
        task: String,

        #[arg(long, value_enum, default_value = "python")]
        language: Language,

        #[arg(long, value_enum, default_value = "production")]
        quality: Quality,

        /// Apply the production-hardening pass after the loop
        #[arg(long)]
        finalize: bool,

        /// Also generate edge-case tests for the final artifact
        #[arg(long)]
        tests: bool,

        #[command(flatten)]
        refine: RefineArgs,
    },
    /// Generate, critique, and refine marketing content
    Content {
        /// Topic or product the content is about
        topic: String,

        /// Key feature to highlight; repeat the flag for several
        #[arg(long = "feature")]
        features: Vec<String>,

        #[arg(long, default_value = "a general audience")]
        audience: String,

        #[arg(long, value_enum, default_value = "inspirational")]
        tone: Tone,

        #[command(flatten)]
        refine: RefineArgs,
    },
}

#[derive(Args)]
struct RefineArgs {
    #[arg(long, value_enum, default_value = "llama3-70b-8192")]
    model: ModelId,

    /// Model for critique calls; defaults to the generation model
    #[arg(long, value_enum)]
    critique_model: Option<ModelId>,

    /// Number of critique+revision cycles (1-5)
    #[arg(long, default_value_t = 3)]
    steps: u32,

    /// Critique persona; defaults per artifact kind
    #[arg(long, value_enum)]
    persona: Option<Persona>,

    /// Sampling temperature (0.0-1.0); defaults to 0.2 for code, 0.5 for content
    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long, default_value_t = 2048)]
    max_tokens: u32,

    /// Write the final artifact here instead of the default export name
    #[arg(long)]
    output: Option<PathBuf>,
}

impl RefineArgs {
    fn into_config(self, spec: &TaskSpec) -> (RefinementConfig, Option<PathBuf>) {
        let default_temperature = match spec {
            TaskSpec::Code { .. } => 0.2,
            TaskSpec::Content { .. } => 0.5,
        };
        let config = RefinementConfig {
            model: self.model,
            critique_model: self.critique_model.unwrap_or(self.model),
            steps: self.steps,
            persona: self
                .persona
                .unwrap_or_else(|| Persona::default_for(spec.kind())),
            temperature: self.temperature.unwrap_or(default_temperature),
            max_output_tokens: self.max_tokens,
        };
        (config, self.output)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_config()?;

    // Create Groq client
    let backend = Arc::new(GroqClient::new(config.api_key)?);

    let (spec, refine, finalize, tests) = match cli.command {
        Command::Code {
            task,
            language,
            quality,
            finalize,
            tests,
            refine,
        } => (
            TaskSpec::Code {
                task,
                language,
                quality,
            },
            refine,
            finalize,
            tests,
        ),
        Command::Content {
            topic,
            features,
            audience,
            tone,
            refine,
        } => (
            TaskSpec::Content {
                topic,
                features,
                audience,
                tone,
            },
            refine,
            false,
            false,
        ),
    };

    let (refinement, output) = refine.into_config(&spec);
    let runner = ReflectionLoop::new(backend, refinement)?;

    run(&runner, &spec, output, finalize, tests).await
}

/// Drive the run step by step so a mid-loop failure still leaves the
/// partial artifact printed and exported.
async fn run(
    runner: &ReflectionLoop,
    spec: &TaskSpec,
    output: Option<PathBuf>,
    finalize: bool,
    tests: bool,
) -> Result<()> {
    let mut state = runner.start_generation(spec).await?;
    println!(
        "=== Initial {} ===\n{}\n",
        spec.kind().label(),
        state.current_artifact()
    );

    let mut halted: Option<Error> = None;

    while !state.is_done() {
        match runner.run_reflection_cycle(spec, &mut state).await {
            Ok(()) => {
                let step = state.step_index();
                if let Some(critique) = state.latest_critique() {
                    println!("=== Step {} critique ===\n{}\n", step, critique);
                }
                println!(
                    "=== Step {} revision ===\n{}\n",
                    step,
                    state.current_artifact()
                );
            }
            Err(e) => {
                eprintln!(
                    "Refinement halted at step {} of {}: {}",
                    state.step_index() + 1,
                    state.steps(),
                    e
                );
                halted = Some(e);
                break;
            }
        }
    }

    let mut export_spec = export::artifact_export(spec);

    if halted.is_none() && finalize {
        match runner.finalize(spec, &mut state).await {
            Ok(finalized) => {
                println!("=== Production-grade code ===\n{}\n", finalized);
                if let Some(language) = spec.language() {
                    export_spec = export::finalized_export(language);
                }
            }
            Err(e) => {
                eprintln!("Finalization failed: {}", e);
                halted = Some(e);
            }
        }
    }

    // Export whatever the run produced, even after a halt.
    let path = output.unwrap_or_else(|| PathBuf::from(&export_spec.file_name));
    export::write_artifact(&path, state.current_artifact())?;
    println!("Saved {} ({})", path.display(), export_spec.mime);

    if halted.is_none() && tests {
        if let Some(language) = spec.language() {
            match runner.generate_tests(state.current_artifact(), language).await {
                Ok(test_cases) => {
                    println!("=== Test cases ===\n{}\n", test_cases);
                    let tests_path = PathBuf::from(export::tests_export(language).file_name);
                    export::write_artifact(&tests_path, &test_cases)?;
                    println!("Saved {}", tests_path.display());
                }
                Err(e) => {
                    eprintln!("Test generation failed: {}", e);
                    halted = Some(e);
                }
            }
        }
    }

    match halted {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
