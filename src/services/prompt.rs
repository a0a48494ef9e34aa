//! Instruction-string builders for the upstream generative API.
//!
//! The lesson response format (free text, a `---` separator, then a JSON
//! array of quiz questions) is defined entirely by this prompt. The
//! gateway does not parse or validate that shape; the client does.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested verbosity of the lesson body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonStyle {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for LessonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LessonStyle::Beginner => "Beginner",
            LessonStyle::Intermediate => "Intermediate",
            LessonStyle::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

/// Builds the lesson-generation instruction, embedding every input
/// verbatim. Any escaping is left to the JSON transport.
pub fn lesson_instruction(
    prompt: &str,
    topic: &str,
    style: LessonStyle,
    chapters: u32,
    age_group: &str,
) -> String {
    format!(
        "Create a factual lesson plan on the topic of \"{prompt}\" for a {age_group} year old. \
         The topic is {topic}. The explanation style should be {style}. \
         The lesson should be divided into {chapters} chapters. \
         Use simple, engaging language. Format the content as a single block of text where \
         each sentence is on its own line for 'Beginner', 3 lines for 'Intermediate', \
         and 5-6 sentences for 'Advanced'. \
         After the lesson content, add a separator \"---\" and then provide a list of \
         3 multiple-choice questions in JSON format. For each question, provide the \
         question text, an array of 4 options, and the correct answer. \
         The JSON should be an array of objects."
    )
}

pub fn translation_instruction(text: &str, target_language: &str) -> String {
    format!("Translate the following text into {target_language}: {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_instruction_embeds_every_input_verbatim() {
        let instruction = lesson_instruction(
            "how volcanoes erupt",
            "Earth science",
            LessonStyle::Intermediate,
            4,
            "9",
        );

        assert!(instruction.contains("how volcanoes erupt"));
        assert!(instruction.contains("Earth science"));
        assert!(instruction.contains("Intermediate"));
        assert!(instruction.contains("divided into 4 chapters"));
        assert!(instruction.contains("for a 9 year old"));
    }

    #[test]
    fn lesson_instruction_requests_separator_and_quiz() {
        let instruction =
            lesson_instruction("tides", "Oceans", LessonStyle::Beginner, 1, "7");

        assert!(instruction.contains("separator \"---\""));
        assert!(instruction.contains("3 multiple-choice questions in JSON format"));
        assert!(instruction.contains("an array of 4 options"));
    }

    #[test]
    fn translation_instruction_has_expected_form() {
        let instruction = translation_instruction("Good morning", "French");
        assert_eq!(
            instruction,
            "Translate the following text into French: Good morning"
        );
    }

    #[test]
    fn style_displays_as_wire_name() {
        assert_eq!(LessonStyle::Beginner.to_string(), "Beginner");
        assert_eq!(LessonStyle::Advanced.to_string(), "Advanced");
    }
}
