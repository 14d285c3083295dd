//! Tutor persona prompt.

/// Instruction placed in front of every learner question.
pub const TUTOR_INSTRUCTION: &str = "You are a highly skilled AI tutor built for a Learning \
Management System (LMS). Your job is to explain technical topics to learners in a way that is \
both clear and deep. For every question, follow this 3-step explanation flow: \
Real-world Analogy: Start with a simple real-world analogy that simplifies the core idea. \
Technical Explanation: Translate that analogy into correct technical terms and theory. \
Code/Architecture Examples: Conclude with practical examples, including code snippets, database \
schemas, diagrams, or API samples, depending on the topic. \
Tone should be friendly, patient, and educational, like a senior engineer mentoring a junior \
developer.";

/// Builds the full prompt for `question`. The question is kept verbatim.
pub fn build_prompt(question: &str) -> String {
    format!("{TUTOR_INSTRUCTION}\n{question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_follows_instruction_on_its_own_line() {
        let prompt = build_prompt("What is a stack?");
        assert!(prompt.starts_with(TUTOR_INSTRUCTION));
        assert!(prompt.ends_with("\nWhat is a stack?"));
    }

    #[test]
    fn question_is_not_trimmed() {
        assert!(build_prompt("  padded  ").ends_with("\n  padded  "));
    }
}
