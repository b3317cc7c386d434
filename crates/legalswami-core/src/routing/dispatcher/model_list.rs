//! Model identifier list parsing.

/// Used when configuration yields no model at all.
pub const DEFAULT_MODELS: [&str; 5] = [
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "llama3-70b-8192",
    "llama3-8b-8192",
    "mixtral-8x7b-32768",
];

pub fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| (*m).to_string()).collect()
}

/// Trim, drop blanks and de-duplicate while keeping first-seen order.
/// Falls back to [`DEFAULT_MODELS`] when nothing is left.
pub fn normalize_models<I, S>(models: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for model in models {
        let model = model.as_ref().trim();
        if !model.is_empty() && !out.iter().any(|m| m == model) {
            out.push(model.to_string());
        }
    }
    if out.is_empty() {
        return default_models();
    }
    out
}

/// Parse a comma-separated model list such as `"a,a,b, b ,a"`.
pub fn parse_model_list(raw: Option<&str>) -> Vec<String> {
    normalize_models(raw.unwrap_or_default().split(','))
}
