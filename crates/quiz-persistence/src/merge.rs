//! Adopting quizzes returned by the backing store.

use quiz_model::Quiz;
use tracing::info;

/// Adopt a server-returned quiz as the new authoritative value.
///
/// The server's data wins wholesale. Back-references are re-stamped from the
/// owning entity so `quiz_id` and `question_id` always agree with the tree.
pub fn merge_loaded(server: Quiz) -> Quiz {
    let mut quiz = server;
    let quiz_id = quiz.id.clone();
    for question in &mut quiz.questions {
        question.quiz_id = Some(quiz_id.clone());
        for option in &mut question.options {
            option.question_id = Some(question.id.clone());
        }
    }
    info!(
        quiz = %quiz.id,
        version = quiz.version,
        questions = quiz.questions.len(),
        "adopted quiz from store"
    );
    quiz
}
