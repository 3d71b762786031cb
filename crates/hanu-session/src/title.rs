/// Maximum characters of the first user message kept as a thread title.
const TITLE_SEED_MAX: usize = 30;

/// Derive a thread title from the first message of a new conversation,
/// truncated to a bounded display length.
pub fn derive_title(seed: &str) -> String {
    if seed.chars().count() > TITLE_SEED_MAX {
        let clipped: String = seed.chars().take(TITLE_SEED_MAX).collect();
        format!("{}...", clipped)
    } else {
        seed.to_string()
    }
}
