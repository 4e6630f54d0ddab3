// Prompt constants for question generation.

/// MCQ generation prompt template.
/// Replace: {num_questions}, {description}, {difficulty}, {json_only}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate exactly {num_questions} multiple-choice questions (MCQs) in JSON format based on this job description:

{description}

Do NOT ask questions about the job description itself. Ask about the skills and knowledge the job requires.
Difficulty: {difficulty}

Format strictly as a JSON array:
[
  {
    "question": "string",
    "options": { "A": "opt1", "B": "opt2", "C": "opt3", "D": "opt4" },
    "answer": "A"
  }
]

RULES:
1. Exactly {num_questions} objects in the array
2. Every question has exactly the four options A, B, C and D
3. `answer` is the key of the single correct option
4. Vary the position of the correct answer across questions

{json_only}"#;
