/// Portrait expression shown alongside the transcript.
///
/// Derived from the sentiment label on every classification result; there is
/// no persisted expression state. Unknown labels map to [`Expression::Neutral`],
/// which is also the portrait's state at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl Expression {
    /// Map a sentiment label to an expression. Case-insensitive; anything
    /// outside the three canonical labels is treated as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Expression::Positive,
            "negative" => Expression::Negative,
            _ => Expression::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Positive => "positive",
            Expression::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_case_insensitively() {
        assert_eq!(Expression::from_label("Positive"), Expression::Positive);
        assert_eq!(Expression::from_label("NEGATIVE"), Expression::Negative);
        assert_eq!(Expression::from_label("neutral"), Expression::Neutral);
    }

    #[test]
    fn unknown_labels_fall_back_to_neutral() {
        assert_eq!(Expression::from_label("unknown"), Expression::Neutral);
        assert_eq!(Expression::from_label(""), Expression::Neutral);
        assert_eq!(Expression::from_label("  mixed  "), Expression::Neutral);
    }

    #[test]
    fn default_is_neutral() {
        assert_eq!(Expression::default(), Expression::Neutral);
    }
}
