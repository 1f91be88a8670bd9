//! Display names for the known CVDP categories and difficulties

pub const KNOWN_CATEGORIES: &[(&str, &str)] = &[
    ("cid002", "RTL Code Completion"),
    ("cid003", "Specification to RTL"),
    ("cid004", "RTL Code Modification"),
    ("cid005", "Code Translation"),
    ("cid007", "Code Improvement"),
    ("cid012", "Testbench Stimulus Generation"),
    ("cid013", "Testbench Checker Generation"),
    ("cid014", "Assertion Generation"),
    ("cid016", "Debugging"),
    ("cid020", "RTL to Specification"),
    ("cid021", "Specification to Testbench"),
    ("cid022", "RTL Technical Q&A"),
    ("cid023", "Testbench Technical Q&A"),
    ("cid024", "RTL-Spec Matching"),
];

pub const KNOWN_DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

/// Human name for a category id; unknown ids are shown as-is.
pub fn category_name(id: &str) -> &str {
    KNOWN_CATEGORIES
        .iter()
        .find(|(cid, _)| *cid == id)
        .map(|(_, name)| *name)
        .unwrap_or(id)
}

pub fn difficulty_label(difficulty: &str) -> String {
    difficulty.to_uppercase()
}
