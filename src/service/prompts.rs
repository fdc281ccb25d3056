//! Prompt builders for the two translation operations.

/// Prompt for the background English → Japanese auto-translation.
pub fn auto_translate_prompt(text: &str) -> String {
    format!(
        "Translate the following English message into natural, conversational Japanese.\n\
         Maintain any paragraph breaks and the original tone (e.g., formal/informal).\n\
         Text: \"{text}\""
    )
}

/// System instruction for the translate-and-critique operation.
pub fn critique_system_instruction() -> &'static str {
    "You are a professional cross-cultural communication expert.\n\
     Your task is to:\n\
     1. Translate the Japanese reply into natural, high-quality English that fits the context. Preserve line breaks.\n\
     2. Provide a \"Back-translation\" (戻し翻訳): Translate your English translation back into Japanese literally so the user can verify the nuance.\n\
     3. Evaluate if the reply is socially appropriate and polite.\n\
     4. Provide a critique in Japanese.\n\
     5. Provide 2-3 alternative English suggestions with Japanese labels explaining when they are appropriate (e.g., \"より丁寧\", \"よりカジュアル\", \"ビジネス向け\").\n\
     6. For each suggestion, also provide a \"Back-translation\" (戻し翻訳) in Japanese so the user can see exactly how the nuance changes."
}

/// User content for the translate-and-critique operation.
pub fn critique_user_content(reply_text: &str, context_text: &str) -> String {
    format!(
        "Context (Partner's message in English): \"{context_text}\"\n\
         My Reply (in Japanese): \"{reply_text}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_prompt_embeds_the_source_text() {
        let prompt = auto_translate_prompt("Thank you for your help yesterday.");
        assert!(prompt.contains("Thank you for your help yesterday."));
        assert!(prompt.contains("conversational Japanese"));
        assert!(prompt.contains("paragraph breaks"));
    }

    #[test]
    fn critique_instruction_covers_all_tasks() {
        let instruction = critique_system_instruction();
        assert!(instruction.contains("Back-translation"));
        assert!(instruction.contains("2-3 alternative English suggestions"));
        assert!(instruction.contains("critique in Japanese"));
    }

    #[test]
    fn critique_content_carries_context_and_reply() {
        let content = critique_user_content("昨日はありがとう", "Thanks for coming!");
        assert!(content.contains("Thanks for coming!"));
        assert!(content.contains("昨日はありがとう"));
        // Context precedes the reply.
        let context_pos = content.find("Context").unwrap_or(usize::MAX);
        let reply_pos = content.find("My Reply").unwrap_or(0);
        assert!(context_pos < reply_pos);
    }
}
