use game_types::{WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::{Widget, WidgetOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Questions without an answer index can never be answered correctly.
    #[serde(default)]
    pub answer_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSpec {
    pub questions: Vec<QuizQuestion>,
}

/// Multiple choice quiz. The first option picked for a question is binding.
#[derive(Debug, Clone)]
pub struct QuizGame {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    answers: Vec<Option<usize>>,
}

impl QuizGame {
    pub fn new(spec: QuizSpec) -> Self {
        let answers = vec![None; spec.questions.len()];
        Self {
            questions: spec.questions,
            current: 0,
            score: 0,
            answers,
        }
    }

    /// Lock in `option` for the current question. Repeat clicks are no-ops.
    pub fn select(&mut self, option: usize) -> bool {
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if self.answers[self.current].is_some() || option >= question.options.len() {
            return false;
        }

        if question.answer_index == Some(option) {
            self.score += 1;
        }
        self.answers[self.current] = Some(option);
        true
    }

    /// Move on once the current question has been answered.
    pub fn next_question(&mut self) -> bool {
        if self.current + 1 < self.questions.len() && self.answers[self.current].is_some() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// round(correct / total * 100); an empty quiz scores 0
    pub fn score_percent(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.questions.len() as f64) * 100.0).round() as u8
    }
}

impl Widget for QuizGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::SelectOption { option } => self.select(*option),
            WidgetInput::NextQuestion => self.next_question(),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    fn outcome(&self) -> Option<WidgetOutcome> {
        self.is_solved().then(|| WidgetOutcome::Scored {
            score_percent: self.score_percent(),
        })
    }

    fn view(&self) -> WidgetView {
        let question = self.questions.get(self.current);
        WidgetView::Quiz {
            question_index: self.current,
            total_questions: self.questions.len(),
            score: self.score,
            prompt: question.map(|q| q.prompt.clone()),
            options: question.map(|q| q.options.clone()).unwrap_or_default(),
            locked_answer: self.answers.get(self.current).copied().flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer_index: Option<usize>) -> QuizQuestion {
        QuizQuestion {
            prompt: "?".to_string(),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            answer_index,
        }
    }

    fn create_test_quiz(count: usize) -> QuizGame {
        QuizGame::new(QuizSpec {
            questions: (0..count).map(|i| question(Some(i % 3))).collect(),
        })
    }

    fn answer_all(quiz: &mut QuizGame, pick: impl Fn(usize) -> usize) {
        for i in 0..quiz.total() {
            assert!(quiz.select(pick(i)));
            quiz.next_question();
        }
    }

    #[test]
    fn test_all_correct_scores_100() {
        let mut quiz = create_test_quiz(4);
        answer_all(&mut quiz, |i| i % 3);
        assert!(quiz.is_solved());
        assert_eq!(
            quiz.outcome(),
            Some(WidgetOutcome::Scored { score_percent: 100 })
        );
    }

    #[test]
    fn test_none_correct_scores_0() {
        let mut quiz = create_test_quiz(4);
        answer_all(&mut quiz, |i| (i + 1) % 3);
        assert!(quiz.is_solved());
        assert_eq!(quiz.score_percent(), 0);
    }

    #[test]
    fn test_score_is_rounded() {
        let mut quiz = create_test_quiz(3);
        // Correct, wrong, wrong -> 33.33 -> 33
        answer_all(&mut quiz, |i| if i == 0 { 0 } else { (i + 1) % 3 });
        assert_eq!(quiz.score_percent(), 33);

        let mut quiz = create_test_quiz(3);
        // Correct, correct, wrong -> 66.67 -> 67
        answer_all(&mut quiz, |i| if i < 2 { i % 3 } else { 0 });
        assert_eq!(quiz.score_percent(), 67);
    }

    #[test]
    fn test_first_click_is_binding() {
        let mut quiz = create_test_quiz(2);
        assert!(quiz.select(1)); // wrong answer for question 0
        assert!(!quiz.select(0)); // the correct one no longer counts
        assert!(!quiz.select(0));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_cannot_skip_unanswered_question() {
        let mut quiz = create_test_quiz(2);
        assert!(!quiz.next_question());
        assert_eq!(quiz.current_index(), 0);
        assert!(!quiz.is_solved());
    }

    #[test]
    fn test_out_of_range_option_ignored() {
        let mut quiz = create_test_quiz(1);
        assert!(!quiz.select(7));
        assert!(!quiz.is_solved());
    }

    #[test]
    fn test_missing_answer_index_never_scores() {
        let mut quiz = QuizGame::new(QuizSpec {
            questions: vec![question(None), question(None)],
        });
        answer_all(&mut quiz, |_| 0);
        assert!(quiz.is_solved());
        assert_eq!(quiz.score_percent(), 0);
    }

    #[test]
    fn test_empty_quiz() {
        let quiz = QuizGame::new(QuizSpec { questions: vec![] });
        assert!(quiz.is_solved());
        assert_eq!(quiz.score_percent(), 0);
    }
}
