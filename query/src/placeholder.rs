use strum_macros::{AsRefStr, Display};

/// Parameter marker style of a SQL dialect.
///
/// Indexes are 1-based and restart with every statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Placeholder {
    /// `?` for every parameter (MySQL).
    Question,
    /// `$1`, `$2`, ... (PostgreSQL).
    Numbered,
}

impl Placeholder {
    pub fn placeholder(&self, index: usize) -> String {
        debug_assert!(index > 0, "placeholder indexes start at 1");
        match self {
            Self::Question => "?".to_owned(),
            Self::Numbered => format!("${index}"),
        }
    }

    pub fn sequence(&self) -> PlaceholderSequence {
        PlaceholderSequence {
            placeholder: *self,
            next: 1,
        }
    }
}

/// Hands out the placeholders of one statement in order.
#[derive(Debug)]
pub struct PlaceholderSequence {
    placeholder: Placeholder,
    next: usize,
}

impl PlaceholderSequence {
    pub fn next_placeholder(&mut self) -> String {
        let placeholder = self.placeholder.placeholder(self.next);
        self.next += 1;
        placeholder
    }

    /// Number of placeholders handed out so far.
    pub fn count(&self) -> usize {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_marks_ignore_the_index() {
        assert_eq!(Placeholder::Question.placeholder(1), "?");
        assert_eq!(Placeholder::Question.placeholder(7), "?");
    }

    #[test]
    fn numbered_placeholders_follow_the_index() {
        assert_eq!(Placeholder::Numbered.placeholder(1), "$1");
        assert_eq!(Placeholder::Numbered.placeholder(12), "$12");
    }

    #[test]
    fn sequences_start_at_one_and_never_reset() {
        let mut sequence = Placeholder::Numbered.sequence();
        assert_eq!(sequence.next_placeholder(), "$1");
        assert_eq!(sequence.next_placeholder(), "$2");
        assert_eq!(sequence.next_placeholder(), "$3");
        assert_eq!(sequence.count(), 3);

        let mut fresh = Placeholder::Numbered.sequence();
        assert_eq!(fresh.count(), 0);
        assert_eq!(fresh.next_placeholder(), "$1");
    }
}
