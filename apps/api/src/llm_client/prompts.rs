// Cross-cutting prompt fragments. Feature modules keep their own prompts.rs
// and splice these in.

/// Tone instruction appended to every assistant prompt.
pub const TONE_INSTRUCTION: &str =
    "Always keep the tone human-friendly, clear, and relevant to the task.";
