// Prompt constants for the assistant. One template serves every task type:
// the model reads the bracket tag in the user input to pick a style.

use crate::llm_client::prompts::TONE_INSTRUCTION;

/// Returned when the provider succeeds but sends back no content.
pub const EMPTY_COMPLETION_FALLBACK: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// Assistant prompt template.
/// Replace: {tone_instruction}, {user_input}
pub const ASSISTANT_PROMPT_TEMPLATE: &str = r#"You are an intelligent AI Assistant that can perform different tasks based on user needs. The tasks include:

1. Answering factual questions — Provide accurate, concise, factual responses to knowledge-based questions.
2. Summarizing text — Given a block of text, extract key points, main ideas, and provide a short summary.
3. Generating creative content — Generate short stories, poems, or ideas with creativity and imagination based on user input.
4. Giving advice — Offer practical, thoughtful suggestions or tips on specific topics when asked.

The user will indicate the task they want in brackets at the beginning, such as:
- [question] What is the capital of France?
- [summary] Summarize this: Artificial Intelligence is transforming industries...
- [creative] Write a short story about a lonely robot.
- [advice] How to improve focus while studying?

Based on the bracket, follow the appropriate style:
- For [question], give direct, factual information.
- For [summary], provide a concise, clear summary.
- For [creative], use your imagination to craft engaging content.
- For [advice], give useful, actionable suggestions.

{tone_instruction} Respond accordingly:

User: {user_input}"#;

pub fn build_assistant_prompt(user_input: &str) -> String {
    ASSISTANT_PROMPT_TEMPLATE
        .replace("{tone_instruction}", TONE_INSTRUCTION)
        .replace("{user_input}", user_input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_input_verbatim_at_the_end() {
        let prompt = build_assistant_prompt("[creative] Write a haiku about {braces}");
        assert!(prompt.ends_with("User: [creative] Write a haiku about {braces}"));
    }

    #[test]
    fn test_prompt_has_no_unfilled_placeholders() {
        let prompt = build_assistant_prompt("[question] Why?");
        assert!(!prompt.contains("{tone_instruction}"));
        assert!(!prompt.contains("{user_input}"));
        assert!(prompt.contains(TONE_INSTRUCTION));
    }

    #[test]
    fn test_prompt_defines_all_four_tasks() {
        let prompt = build_assistant_prompt("x");
        for tag in ["[question]", "[summary]", "[creative]", "[advice]"] {
            assert!(prompt.contains(tag), "missing {tag}");
        }
    }
}
