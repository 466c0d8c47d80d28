//! The fixed account voice: prompt text and sampling settings for the
//! posting bot and the reply bot.

use crate::CompletionRequest;

pub const POST_STYLE: &str = "You are a Braves fan with dry sarcasm, deadpan humor, and \
analytical bite. Write like a human. Stay under 280 characters. No hashtags unless \
essential. No prefaces like 'Here is a tweet'.";

pub const POST_INSTRUCTION: &str = "Write ONE fresh Braves tweet in that voice.";

pub const REPLY_STYLE_GUIDE: &str = "\
Voice: Atlanta Braves fan; dry sarcasm, deadpan humor, analytical bite. Confident, quick, never cringe.
Rules:
- Reply with ONE line, <= 220 chars (shorter than a full tweet, since it's a reply).
- Punctuation is ok but NEVER end with a period.
- Keep it Braves-first unless the context is league-wide.
- Use playful pettiness or sardonic stats when it fits. Avoid cliches.
- Light profanity ok (\"frick\"), nothing harsher.";

pub fn post_request() -> CompletionRequest {
    CompletionRequest {
        system: POST_STYLE.to_string(),
        user: POST_INSTRUCTION.to_string(),
        temperature: 0.85,
        max_tokens: 120,
    }
}

pub fn reply_request(author: &str, context: &str) -> CompletionRequest {
    CompletionRequest {
        system: REPLY_STYLE_GUIDE.to_string(),
        user: format!(
            "Reply to @{author}'s post with one witty line in the style. \
Context:\n---\n{context}\n---\nNo preface, no quotes."
        ),
        temperature: 0.9,
        max_tokens: 120,
    }
}
