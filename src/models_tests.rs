//! Unit tests for data models

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::*;
    use crate::MatchQuizError;

    fn question(id: QuestionId, category: &str) -> Question {
        Question {
            id,
            text: format!("Question {id}?"),
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    // ====== AnswerValue Tests ======

    #[test]
    fn test_answer_value_scale() {
        assert_eq!(AnswerValue::Skipped.value(), 0);
        assert_eq!(AnswerValue::No.value(), 1);
        assert_eq!(AnswerValue::Interested.value(), 2);
        assert_eq!(AnswerValue::Like.value(), 3);
        assert_eq!(AnswerValue::Favorite.value(), 4);
    }

    #[test]
    fn test_answer_value_try_from() {
        for raw in 0..=4 {
            assert_eq!(AnswerValue::try_from(raw).unwrap().value(), raw);
        }
        assert!(matches!(
            AnswerValue::try_from(5),
            Err(MatchQuizError::InvalidValue(5))
        ));
        assert!(matches!(
            AnswerValue::try_from(-1),
            Err(MatchQuizError::InvalidValue(-1))
        ));
    }

    #[test]
    fn test_answer_value_labels_and_markers() {
        assert_eq!(AnswerValue::Favorite.to_string(), "🔵 Favorite");
        assert_eq!(AnswerValue::Skipped.to_string(), "❓ Skipped");
        assert!(!AnswerValue::Skipped.is_answered());
        assert!(AnswerValue::No.is_answered());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(AnswerValue::parse_choice("4"), Some(AnswerValue::Favorite));
        assert_eq!(AnswerValue::parse_choice(" Like "), Some(AnswerValue::Like));
        assert_eq!(AnswerValue::parse_choice("i"), Some(AnswerValue::Interested));
        assert_eq!(AnswerValue::parse_choice("🔴"), Some(AnswerValue::No));
        assert_eq!(AnswerValue::parse_choice("0"), None);
        assert_eq!(AnswerValue::parse_choice("skipped"), None);
    }

    #[test]
    fn test_answer_value_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&AnswerValue::Like).unwrap(), "3");
        let value: AnswerValue = serde_json::from_str("2").unwrap();
        assert_eq!(value, AnswerValue::Interested);
        assert!(serde_json::from_str::<AnswerValue>("9").is_err());
    }

    // ====== Profile Tests ======

    #[test]
    fn test_profile_raw_answers_and_counts() {
        let q1 = question(1, "Food");
        let q4 = question(4, "Travel");
        let profile = Profile::new(
            9,
            "tester",
            vec![
                Response::new(&q4, AnswerValue::Skipped),
                Response::new(&q1, AnswerValue::Favorite),
            ],
        );

        assert_eq!(
            profile.raw_answers().into_iter().collect::<Vec<_>>(),
            vec![(1, 4), (4, 0)]
        );
        assert_eq!(profile.answered_count(), 1);
        assert_eq!(profile.total_responses(), 2);
        assert_eq!(profile.match_count, 0);
        assert_eq!(profile.responses[&4].category, "Travel");
    }

    #[test]
    fn test_response_defaults_category_when_missing() {
        let response: Response =
            serde_json::from_str(r#"{"question_id":1,"question":"Q?","value":3}"#).unwrap();
        assert_eq!(response.category, DEFAULT_CATEGORY);
        assert_eq!(response.value, AnswerValue::Like);
    }

    #[test]
    fn test_match_report_top() {
        let entry = |id: UserId, score: u8| MatchEntry {
            user_id: id,
            username: format!("user{id}"),
            score,
            identical_answers: 0,
        };
        let report = MatchReport {
            user_id: 1,
            total_candidates: 3,
            matches: vec![entry(2, 90), entry(3, 80), entry(4, 70)],
        };

        assert_eq!(report.top(2).len(), 2);
        assert_eq!(report.top(10).len(), 3);
        assert_eq!(report.top(0).len(), 0);
    }
}
