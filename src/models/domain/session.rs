use serde::{Deserialize, Serialize};

/// Running score for one quiz run. The caller carries this value across
/// requests; nothing is stored server-side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub correct_count: u32,
    pub total_count: u32,
}

impl QuizSession {
    pub fn new(correct_count: u32, total_count: u32) -> Self {
        Self {
            correct_count,
            total_count,
        }
    }

    /// Apply the reset/score rules for a request at `index`.
    ///
    /// Index 0 starts a fresh run and zeroes both counters, ignoring
    /// whatever stale values the caller carried over from an earlier run.
    /// Later positions score the previous question when a correctness flag
    /// was supplied, and leave the counts untouched when it was not.
    pub fn progress(self, index: usize, prior_correct: Option<bool>) -> Self {
        if index == 0 {
            return Self::default();
        }

        match prior_correct {
            Some(correct) => Self {
                correct_count: self.correct_count + u32::from(correct),
                total_count: self.total_count + 1,
            },
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_resets_regardless_of_carried_counts() {
        let session = QuizSession::new(7, 9).progress(0, Some(true));
        assert_eq!(session, QuizSession::default());
    }

    #[test]
    fn correct_answer_increments_both_counts() {
        let session = QuizSession::new(2, 2).progress(3, Some(true));
        assert_eq!(session, QuizSession::new(3, 3));
    }

    #[test]
    fn wrong_answer_increments_total_only() {
        let session = QuizSession::new(2, 2).progress(3, Some(false));
        assert_eq!(session, QuizSession::new(2, 3));
    }

    #[test]
    fn missing_flag_leaves_counts_unchanged() {
        let session = QuizSession::new(2, 2).progress(3, None);
        assert_eq!(session, QuizSession::new(2, 2));
    }
}
