use proptest::prelude::*;
use quiz_editor::{
    CorrelationStrategy, QuizProjection, parse_quiz, rebuild_quiz, render_quiz,
};
use quiz_model::{OptionField, QuestionField, Quiz};

fn quiz_strategy() -> impl Strategy<Value = Quiz> {
    let option = ("\\PC{0,12}", any::<bool>(), prop::collection::vec("[a-z:/.]{0,10}", 0..3));
    let question = ("\\PC{0,12}", prop::collection::vec(option, 0..4));
    ("\\PC{0,12}", "\\PC{0,12}", prop::collection::vec(question, 0..4)).prop_map(
        |(name, description, questions)| {
            let mut quiz = Quiz::draft(name, description);
            for (qi, (text, options)) in questions.into_iter().enumerate() {
                quiz = quiz.add_question();
                let question_id = quiz.questions[qi].id.clone();
                quiz = quiz.set_question_field(&question_id, QuestionField::Text(text));
                for (oi, (text, correct, extras)) in options.into_iter().enumerate() {
                    quiz = quiz.add_option(&question_id);
                    let option_id = quiz.questions[qi].options[oi].id.clone();
                    quiz = quiz
                        .set_option_field(&question_id, &option_id, OptionField::Text(text))
                        .set_option_field(&question_id, &option_id, OptionField::IsCorrect(correct))
                        .set_option_field(&question_id, &option_id, OptionField::Extras(extras));
                }
            }
            quiz
        },
    )
}

proptest! {
    #[test]
    fn rendered_projection_parses_back(quiz in quiz_strategy()) {
        let parsed = parse_quiz(&render_quiz(&quiz)).unwrap();
        prop_assert_eq!(parsed, QuizProjection::from(&quiz));
    }

    #[test]
    fn committing_unchanged_text_is_identity(quiz in quiz_strategy()) {
        let parsed = parse_quiz(&render_quiz(&quiz)).unwrap();
        for strategy in [CorrelationStrategy::ByText, CorrelationStrategy::ByTextThenPosition] {
            let rebuilt = rebuild_quiz(&quiz, parsed.clone(), strategy);
            prop_assert_eq!(&rebuilt, &quiz);
        }
    }
}
