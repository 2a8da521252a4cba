// Fake proofreading service that flags fixed words, for driving full checks

use proofmark::proofread::ReportedError;

#[derive(Debug, Clone)]
struct Rule {
    word: String,
    category: String,
    message: String,
    replacements: String,
}

/// Reports every occurrence of its configured words, in document order
#[derive(Debug, Clone, Default)]
pub struct FakeProofreader {
    rules: Vec<Rule>,
}

impl FakeProofreader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag `word` as a likely typo; `replacements` is `#`-joined like the real service
    pub fn with_typo(self, word: &str, replacements: &str) -> Self {
        self.with_rule(
            word,
            "Possible Typo",
            &format!("Possible spelling mistake found: {word}"),
            replacements,
        )
    }

    pub fn with_rule(mut self, word: &str, category: &str, message: &str, replacements: &str) -> Self {
        self.rules.push(Rule {
            word: word.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            replacements: replacements.to_string(),
        });
        self
    }

    /// Check `text` the way the service would
    pub fn check(&self, text: &str) -> Vec<ReportedError> {
        let mut found = Vec::new();
        for (line_number, line) in text.split('\n').enumerate() {
            for rule in &self.rules {
                for (byte_offset, _) in line.match_indices(rule.word.as_str()) {
                    let from = line[..byte_offset].chars().count();
                    let to = from + rule.word.chars().count();
                    found.push(ReportedError::with_joined_replacements(
                        (line_number, from),
                        (line_number, to),
                        rule.category.as_str(),
                        rule.message.as_str(),
                        &rule.replacements,
                    ));
                }
            }
        }
        found.sort_by_key(|e| (e.from_line, e.from_column));
        found
    }
}
