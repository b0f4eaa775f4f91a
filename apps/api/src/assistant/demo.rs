//! Demo mode: pre-written responses served when the live provider cannot be used.
//!
//! Lookup order: exact match on (task type, untagged input), then a one-keyword
//! substring match for questions only, then a generic per-task message.
//! The keyword match is deliberately loose; it only has to look plausible.

use crate::assistant::validation::strip_task_tag;
use crate::models::task::TaskType;

/// Prepended to every demo response so users can tell it apart from a live answer.
pub const DEMO_PREFIX: &str =
    "[DEMO MODE] The live AI service is unavailable, so this is a pre-written sample response.\n\n";

struct CannedResponse {
    task_type: TaskType,
    prompt: &'static str,
    /// Lowercase token for the loose question match.
    keyword: Option<&'static str>,
    response: &'static str,
}

pub const PARIS_ANSWER: &str = "The capital of France is Paris. It is the country's largest city and \
has been its political, economic, and cultural center for centuries, home to landmarks such as the \
Eiffel Tower, the Louvre, and Notre-Dame Cathedral.";

const CANNED_RESPONSES: &[CannedResponse] = &[
    CannedResponse {
        task_type: TaskType::Question,
        prompt: "What is the capital of France?",
        keyword: Some("france"),
        response: PARIS_ANSWER,
    },
    CannedResponse {
        task_type: TaskType::Question,
        prompt: "What is photosynthesis?",
        keyword: Some("photosynthesis"),
        response: "Photosynthesis is the process plants, algae, and some bacteria use to turn \
light energy into chemical energy. Using sunlight, they combine carbon dioxide and water to make \
glucose, releasing oxygen as a by-product.",
    },
    CannedResponse {
        task_type: TaskType::Question,
        prompt: "Who wrote Romeo and Juliet?",
        keyword: Some("romeo"),
        response: "Romeo and Juliet was written by William Shakespeare. It was first published \
in 1597 and is one of his earliest and most frequently performed tragedies.",
    },
    CannedResponse {
        task_type: TaskType::Summary,
        prompt: "Summarize this: Artificial Intelligence is transforming industries...",
        keyword: None,
        response: "Summary: Artificial Intelligence is reshaping many industries by automating \
routine work, improving decision-making with data, and enabling new products and services. \
The main themes are efficiency gains, new opportunities, and the need to adapt to change.",
    },
    CannedResponse {
        task_type: TaskType::Creative,
        prompt: "Write a short story about a lonely robot.",
        keyword: None,
        response: "Unit 7 swept the empty station every morning, though no train had stopped \
there in years. One day a sparrow landed on its dented shoulder and stayed. Unit 7 kept \
sweeping, but now it hummed, and the station no longer felt empty at all.",
    },
    CannedResponse {
        task_type: TaskType::Advice,
        prompt: "How to improve focus while studying?",
        keyword: None,
        response: "Here are a few ways to improve focus while studying:\n\
1. Work in 25-minute blocks with 5-minute breaks (the Pomodoro technique).\n\
2. Put your phone in another room and block distracting sites.\n\
3. Set one specific goal for each session.\n\
4. Keep a consistent study spot and time.\n\
5. Sleep well, stay hydrated, and take short walks between sessions.",
    },
];

fn generic_response(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::Question => {
            "This is a demo answer. With a working API key, the assistant would give you a \
direct, factual response to your question."
        }
        TaskType::Summary => {
            "This is a demo summary. With a working API key, the assistant would extract the \
key points and main ideas from your text."
        }
        TaskType::Creative => {
            "This is a demo of creative mode. With a working API key, the assistant would \
write an original story, poem, or idea based on your prompt."
        }
        TaskType::Advice => {
            "This is a demo of advice mode. With a working API key, the assistant would offer \
practical, actionable suggestions for your situation."
        }
    }
}

/// Builds the demo response for an input. Never fails.
pub fn demo_response(input: &str, task_type: TaskType) -> String {
    let prompt = strip_task_tag(input, task_type);
    let body = exact_match(task_type, prompt)
        .or_else(|| keyword_match(task_type, prompt))
        .unwrap_or_else(|| generic_response(task_type));
    format!("{DEMO_PREFIX}{body}")
}

fn exact_match(task_type: TaskType, prompt: &str) -> Option<&'static str> {
    CANNED_RESPONSES
        .iter()
        .find(|c| c.task_type == task_type && c.prompt == prompt)
        .map(|c| c.response)
}

fn keyword_match(task_type: TaskType, prompt: &str) -> Option<&'static str> {
    if task_type != TaskType::Question {
        return None;
    }
    let lowered = prompt.to_lowercase();
    CANNED_RESPONSES
        .iter()
        .filter(|c| c.task_type == TaskType::Question)
        .find(|c| c.keyword.is_some_and(|k| lowered.contains(k)))
        .map(|c| c.response)
}
