//! Snapshot and prompt tests for the OpenAI client

#[cfg(test)]
mod snapshot_tests {
    use insta::assert_yaml_snapshot;

    use crate::OpenAiConfig;

    #[test]
    fn test_config_defaults_snapshot() {
        let config = OpenAiConfig::new("test_api_key_redacted".to_string());

        assert_yaml_snapshot!(config, @r###"
        ---
        api_key: test_api_key_redacted
        api_url: "https://api.openai.com/v1"
        embedding_model: text-embedding-ada-002
        embedding_dimension: 1536
        chat_model: gpt-3.5-turbo
        "###);
    }
}

#[cfg(test)]
mod prompt_tests {
    use chrono::NaiveDate;

    use cora_core::{
        CourseRecord, Fee, FreshnessSummary, QueryContextBundle, RankedCourse, VolatileField,
        VolatileFields,
    };

    use crate::prompt::{detect_focus, system_prompt, QuestionFocus};

    fn bundle() -> QueryContextBundle {
        let mut volatile = VolatileFields {
            fee: VolatileField::static_only(Some(Fee {
                amount: 4280.0,
                currency: "SGD".to_string(),
            })),
            ..Default::default()
        };
        volatile
            .next_intake
            .confirm(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
        volatile.fee.mark_failed();

        let course = CourseRecord {
            id: "sd-cm".to_string(),
            title: "Specialist Diploma in Construction Management".to_string(),
            url: Some("https://academy.example.edu/courses/sd-cm".to_string()),
            description: "Site planning and contract administration.".to_string(),
            duration: Some("9 months".to_string()),
            delivery_mode: Some("Part-time".to_string()),
            category: Some("Built Environment".to_string()),
            volatile,
        };
        let freshness = FreshnessSummary::of(&course);

        QueryContextBundle::new(
            "How much does the construction management course cost?",
            vec![RankedCourse {
                course,
                score: 0.91,
                freshness,
            }],
        )
    }

    #[test]
    fn focus_detection() {
        assert_eq!(detect_focus("how much is the fee?"), QuestionFocus::Fees);
        assert_eq!(
            detect_focus("When does the next intake start?"),
            QuestionFocus::Schedule
        );
        assert_eq!(
            detect_focus("what are the entry requirements"),
            QuestionFocus::Requirements
        );
        assert_eq!(
            detect_focus("recommend a course for site supervisors"),
            QuestionFocus::General
        );
    }

    #[test]
    fn detail_prompt_carries_values_and_freshness_notes() {
        let bundle = bundle();
        let question = bundle.question.clone();
        let prompt = system_prompt(&question, &bundle);

        assert!(prompt.contains("data extraction assistant"));
        assert!(prompt.contains("SGD 4280.00"));
        assert!(prompt.contains("(unconfirmed, may be outdated)"));
        assert!(prompt.contains("6 October 2025"));
        assert!(prompt.contains("(confirmed live)"));
        assert!(prompt.contains("https://academy.example.edu/courses/sd-cm"));
    }

    #[test]
    fn general_prompt_asks_for_a_numbered_list() {
        let bundle = bundle();
        let prompt = system_prompt("which course suits a site engineer?", &bundle);

        assert!(prompt.contains("numbered list"));
        assert!(prompt.contains("Specialist Diploma in Construction Management"));
        assert!(prompt.contains("relevance 0.91"));
    }
}
