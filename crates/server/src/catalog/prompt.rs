//! Catalog extraction prompt builder.

/// Maximum number of catalog characters embedded in a prompt.
///
/// Truncation exists only to respect the model's input-size limits. It is a
/// blunt instrument and may cut mid-product; the parser tolerates that by
/// accepting whatever valid JSON the model still returns.
pub const PROMPT_CHAR_BUDGET: usize = 15_000;

/// System prompt for the extraction call.
pub const SYSTEM_PROMPT: &str =
    "You extract structured product listings from store catalog text. \
     Respond with JSON only.";

/// A built catalog prompt.
#[derive(Debug, Clone)]
pub struct CatalogPrompt {
    /// The full instruction text sent as the user message.
    pub text: String,
    /// Whether the catalog text was truncated to the budget.
    pub truncated: bool,
}

/// Build the extraction instruction for a catalog's text.
///
/// Text over [`PROMPT_CHAR_BUDGET`] characters is truncated from the start of
/// the budget (no chunking, no summarization); the `truncated` flag lets the
/// caller log that. The instruction states the exact output contract and
/// embeds the (possibly truncated) text verbatim.
#[must_use]
pub fn build_prompt(extracted: &str) -> CatalogPrompt {
    let (snippet, truncated) = truncate_chars(extracted, PROMPT_CHAR_BUDGET);

    let text = format!(
        "The following text was extracted from a store's product catalog.\n\
         Extract every product as a JSON array. Each element must be an object with keys:\n\
         - \"name\": the product name (string)\n\
         - \"description\": a short description (string, optional)\n\
         - \"price\": the price exactly as written (string, optional)\n\
         Respond with the JSON array and nothing else.\n\
         \n\
         Catalog text:\n\
         {snippet}"
    );

    CatalogPrompt { text, truncated }
}

/// Truncate `s` to at most `budget` characters, respecting char boundaries.
fn truncate_chars(s: &str, budget: usize) -> (&str, bool) {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => (s.get(..idx).unwrap_or(s), true),
        None => (s, false),
    }
}
