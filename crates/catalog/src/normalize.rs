//! Raw JSON line → `ProblemRecord`

use serde_json::{Map, Value};
use tracing::debug;

use crate::flatten::{pretty, scalar_text};
use crate::{flatten, FileMap, ProblemRecord, RecordShape};

pub const NO_DESCRIPTION: &str = "No description available";

const DEFAULT_CATEGORY: &str = "unknown";
const DEFAULT_DIFFICULTY: &str = "medium";

static NULL: Value = Value::Null;

/// Normalize one parsed JSON line. Never fails: missing fields are defaulted.
///
/// `fallback_index` names records without an id (`problem_<index>`).
pub fn normalize(raw: &Value, fallback_index: usize) -> ProblemRecord {
    let body = if let Some(prompt) = present(raw, "prompt") {
        Body::agentic(raw, prompt)
    } else if present(raw, "input").is_some() || present(raw, "output").is_some() {
        Body::non_agentic(raw)
    } else {
        debug!(fallback_index, "record has neither prompt nor input/output");
        Body::unrecognized()
    };
    let body = body.with_placeholder();

    let id = present(raw, "id")
        .map(text)
        .unwrap_or_else(|| format!("problem_{fallback_index}"));

    let categories = raw.get("categories").and_then(Value::as_array);
    let category = categories
        .and_then(|c| c.first())
        .filter(|v| is_truthy(v))
        .map(text)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let difficulty = categories
        .and_then(|c| c.get(1))
        .filter(|v| is_truthy(v))
        .map(text)
        .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());

    ProblemRecord {
        title: derive_title(&id),
        id,
        category,
        difficulty,
        description: body.description,
        prompt: body.prompt,
        context_data: body.context_data,
        patch_data: body.patch_data,
        harness_data: body.harness_data,
        system_message: present(raw, "system_message").map(text),
        shape: body.shape,
    }
}

/// Shape-dependent part of a record.
struct Body {
    shape: RecordShape,
    description: String,
    prompt: String,
    context_data: FileMap,
    patch_data: FileMap,
    harness_data: FileMap,
}

impl Body {
    fn agentic(raw: &Value, prompt: &Value) -> Self {
        let prompt = text(prompt);
        Self {
            shape: RecordShape::Agentic,
            description: prompt.clone(),
            prompt,
            context_data: flatten(field(raw, "context"), ""),
            patch_data: flatten(field(raw, "patch"), ""),
            harness_data: flatten(field(raw, "harness"), ""),
        }
    }

    fn non_agentic(raw: &Value) -> Self {
        let mut body = Self {
            shape: RecordShape::NonAgentic,
            description: String::new(),
            prompt: String::new(),
            context_data: FileMap::new(),
            patch_data: FileMap::new(),
            harness_data: FileMap::new(),
        };

        match raw.get("input") {
            Some(Value::Object(input)) => {
                if let Some(prompt) = input.get("prompt").filter(|v| is_truthy(v)) {
                    body.description = text(prompt);
                    body.prompt = body.description.clone();
                }
                let mut rest: Map<String, Value> = input.clone();
                rest.remove("prompt");
                body.context_data = flatten(&Value::Object(rest), "input");
            }
            Some(Value::String(s)) => {
                body.description = s.clone();
                body.prompt = s.clone();
            }
            Some(other) if is_truthy(other) => {
                body.context_data = flatten(other, "input");
            }
            _ => {}
        }

        match present(raw, "output") {
            Some(output @ Value::Object(_)) => body.patch_data = flatten(output, "output"),
            Some(output) => {
                body.patch_data.insert("expected_output".to_string(), text(output));
            }
            None => {}
        }

        if let Some(Value::Object(harness)) = raw.get("harness") {
            body.harness_data = match harness.get("files") {
                Some(files @ Value::Object(_)) => flatten(files, ""),
                _ => flatten(field(raw, "harness"), ""),
            };
        }

        body
    }

    fn unrecognized() -> Self {
        Self {
            shape: RecordShape::NonAgentic,
            description: String::new(),
            prompt: String::new(),
            context_data: FileMap::new(),
            patch_data: FileMap::new(),
            harness_data: FileMap::new(),
        }
    }

    fn with_placeholder(mut self) -> Self {
        if self.description.is_empty() && self.prompt.is_empty() {
            self.description = NO_DESCRIPTION.to_string();
            self.prompt = NO_DESCRIPTION.to_string();
        }
        self
    }
}

/// Cosmetic title from an id: `cvdp_agentic_fifo_copilot_0007` → `fifo`.
pub fn derive_title(id: &str) -> String {
    let spaced = id.replace('_', " ");
    let spaced = spaced.replacen("cvdp agentic ", "", 1);
    let spaced = spaced.replacen("cvdp ", "", 1);
    let spaced = strip_copilot(&spaced);
    strip_trailing_number(&spaced).trim().to_string()
}

/// Removes every case-insensitive `copilot` plus the whitespace after it.
fn strip_copilot(s: &str) -> String {
    const WORD: &[u8] = b"copilot";

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < s.len() {
        if bytes[i..].len() >= WORD.len() && bytes[i..i + WORD.len()].eq_ignore_ascii_case(WORD) {
            i += WORD.len();
            let rest = &s[i..];
            i += rest.len() - rest.trim_start().len();
            continue;
        }
        let Some(c) = s[i..].chars().next() else { break };
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Drops a trailing whitespace-separated integer token (`"fifo 12"` → `"fifo"`).
fn strip_trailing_number(s: &str) -> &str {
    let without_digits = s.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() < s.len() && without_digits.ends_with(char::is_whitespace) {
        without_digits.trim_end()
    } else {
        s
    }
}

fn field<'a>(raw: &'a Value, key: &str) -> &'a Value {
    raw.get(key).unwrap_or(&NULL)
}

/// Field lookup where `null`, `false`, `0` and `""` count as absent.
fn present<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| is_truthy(v))
}

pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn text(v: &Value) -> String {
    match v {
        Value::Array(_) | Value::Object(_) => pretty(v),
        other => scalar_text(other),
    }
}
