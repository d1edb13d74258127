//! Prompt composition for the Zephyr chat template.

use crate::types::Subject;

/// Build the full prompt for one generation request.
pub fn build_prompt(text: &str, card_count: u32, subject: Subject) -> String {
    let mut prompt = String::new();

    prompt.push_str("<|system|>\n");
    prompt.push_str(&format!(
        "You are an expert flashcard creator. Your task is to generate exactly {card_count} \
         question-answer flashcards based on the provided text.\n"
    ));
    prompt.push_str(
        "Your entire response MUST be a single, valid JSON list of objects. \
         Each object must have a \"question\" key and an \"answer\" key.\n",
    );
    prompt.push_str(
        "Do not add any introduction, explanation, or any text outside of the main JSON list.\n",
    );
    prompt.push_str("Your response must start with '[' and end with ']'.</s>\n");

    prompt.push_str("<|user|>\n");
    prompt.push_str(&format!(
        "Generate flashcards for the following text on the subject of '{subject}':\n"
    ));
    prompt.push_str("---\n");
    prompt.push_str(text);
    prompt.push_str("\n---</s>\n");

    prompt.push_str("<|assistant|>\n");

    prompt
}
