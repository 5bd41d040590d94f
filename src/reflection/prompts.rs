// Prompt assembly for generate / critique / revise / finalize / test calls
//
// Every builder is a pure function: identical inputs yield byte-identical
// conversations. Variability comes solely from caller parameters and the
// remote model's nondeterminism, never from the templates.

use crate::groq::Message;
use crate::reflection::types::{Language, Persona, TaskSpec};

const CONTENT_GENERATION_SYSTEM: &str = "\
You are a visionary content creator specializing in compelling marketing narratives. \
Generate emotionally resonant content that:
1. Captures attention immediately
2. Highlights unique value propositions
3. Uses vivid sensory language
4. Includes strategic CTAs

Format responses with:
- Engaging headline
- Core narrative (2-3 paragraphs)
- Hashtag strategy
- Platform-ready hooks (first 125 characters)";

const CODE_REVISION_SYSTEM: &str =
    "You are a senior software engineer. Improve the code based on the review.";

const CONTENT_REVISION_SYSTEM: &str =
    "You are an expert content editor. Improve the following content based on the critique.";

/// Initial generation request: persona-fixing system message plus the
/// caller's task, interpolated per artifact kind.
pub fn generation_request(spec: &TaskSpec) -> Vec<Message> {
    match spec {
        TaskSpec::Code {
            task,
            language,
            quality,
        } => vec![
            Message::system(format!(
                "You are an expert {} developer. Generate {}-quality code that is:\n\
                 1. Correct and efficient\n\
                 2. Well-commented\n\
                 3. Handles edge cases\n\
                 4. Follows best practices\n\n\
                 Respond ONLY with the code implementation, no explanations.",
                language.display(),
                quality.label()
            )),
            Message::user(task.clone()),
        ],
        TaskSpec::Content {
            topic,
            features,
            audience,
            tone,
        } => vec![
            Message::system(CONTENT_GENERATION_SYSTEM),
            Message::user(format!(
                "Create {} marketing content about {}. Key features:\n{}\nTarget audience: {}.",
                tone.label(),
                topic,
                features.join("\n"),
                audience
            )),
        ],
    }
}

/// Critique request: persona-framed rubric system message plus the artifact
/// embedded verbatim in a fenced block.
pub fn critique_request(spec: &TaskSpec, persona: Persona, artifact: &str) -> Vec<Message> {
    vec![
        Message::system(critique_system(spec, persona)),
        critique_turn(spec, artifact),
    ]
}

/// The user turn of the critique request, also recorded in the transcript.
pub fn critique_turn(spec: &TaskSpec, artifact: &str) -> Message {
    match spec {
        TaskSpec::Code { language, .. } => Message::user(format!(
            "Review this code:\n\n```{}\n{}\n```",
            language.fence(),
            artifact
        )),
        TaskSpec::Content { .. } => Message::user(format!(
            "Analyze this marketing content:\n\n```\n{}\n```\n\n\
             Focus on:\n\
             - Conversion potential\n\
             - Brand voice consistency\n\
             - Platform optimization",
            artifact
        )),
    }
}

fn critique_system(spec: &TaskSpec, persona: Persona) -> String {
    match spec {
        TaskSpec::Code { .. } => format!(
            "You are {}. Provide technical critique focusing on:\n\
             1. Algorithm correctness\n\
             2. Code efficiency\n\
             3. Edge case handling\n\
             4. Best practices\n\n\
             Format:\n\
             - Strengths\n\
             - Weaknesses\n\
             - Improvement Suggestions",
            persona.intro()
        ),
        TaskSpec::Content { .. } => format!(
            "You are {}. Provide razor-sharp critiques that:\n\
             1. Evaluate content effectiveness\n\
             2. Assess audience alignment\n\
             3. Identify optimization opportunities\n\n\
             Critique format:\n\
             - Objective Alignment (1-5)\n\
             - Engagement Gaps\n\
             - Top Strengths\n\
             - Improvement Priorities\n\
             - Quick Wins",
            persona.intro()
        ),
    }
}

/// Revision request: a freshly built conversation carrying exactly the
/// current artifact and the critique it is revised against.
pub fn revision_request(spec: &TaskSpec, artifact: &str, critique: &str) -> Vec<Message> {
    let system = match spec {
        TaskSpec::Code { .. } => CODE_REVISION_SYSTEM,
        TaskSpec::Content { .. } => CONTENT_REVISION_SYSTEM,
    };
    vec![Message::system(system), revision_turn(spec, artifact, critique)]
}

/// The user turn of the revision request, also recorded in the transcript.
pub fn revision_turn(spec: &TaskSpec, artifact: &str, critique: &str) -> Message {
    match spec {
        TaskSpec::Code { language, .. } => Message::user(format!(
            "Original Code:\n```{}\n{}\n```\n\nCode Review:\n{}",
            language.fence(),
            artifact,
            critique
        )),
        TaskSpec::Content { .. } => Message::user(format!(
            "Original Content:\n{}\n\nCritique:\n{}",
            artifact, critique
        )),
    }
}

/// Finalization request for the code path's one-shot hardening pass.
pub fn finalization_request(language: Language, artifact: &str) -> Vec<Message> {
    vec![
        Message::system(format!(
            "You are a senior software engineer. Transform this code into production-ready quality:\n\
             1. Add comprehensive error handling\n\
             2. Optimize performance\n\
             3. Include documentation\n\
             4. Ensure idiomatic {} style",
            language.display()
        )),
        finalization_turn(language, artifact),
    ]
}

pub fn finalization_turn(language: Language, artifact: &str) -> Message {
    Message::user(format!(
        "Refine this code:\n```{}\n{}\n```",
        language.fence(),
        artifact
    ))
}

/// Test generation request: a single user message, no system framing.
pub fn test_generation_request(language: Language, artifact: &str) -> Vec<Message> {
    vec![Message::user(format!(
        "Generate executable test cases covering edge cases for this code:\n\n```{}\n{}\n```",
        language.fence(),
        artifact
    ))]
}
