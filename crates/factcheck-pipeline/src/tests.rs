//! Integration tests for the FactChecker

#[cfg(test)]
mod tests {
    use crate::{FactChecker, PipelineConfig, PipelineError, PromptTemplate};
    use async_trait::async_trait;
    use factcheck_domain::traits::{HistoryStore, SearchProvider};
    use factcheck_domain::{EvidenceItem, HistoryEntry};
    use factcheck_llm::MockProvider;
    use factcheck_search::{MockSearchProvider, SearchError};
    use factcheck_store::{SqliteHistoryStore, StoreError};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const TRUE_REPLY: &str = r#"{"verdict":"True","confidence":"High","reason":"Multiple sources place it in Paris.","additional_context":"Built 1887-1889."}"#;

    fn eiffel_evidence() -> Vec<EvidenceItem> {
        vec![
            EvidenceItem::new(
                "Eiffel Tower - Wikipedia",
                "https://en.wikipedia.org/wiki/Eiffel_Tower",
                "The Eiffel Tower is a wrought-iron lattice tower in Paris, France.",
                0.95,
            ),
            EvidenceItem::new(
                "Eiffel Tower facts",
                "https://www.toureiffel.paris/en",
                "Located on the Champ de Mars in Paris.",
                0.81,
            ),
        ]
    }

    fn checker(
        search: MockSearchProvider,
        llm: MockProvider,
    ) -> FactChecker<MockSearchProvider, MockProvider> {
        FactChecker::new(search, llm, PromptTemplate::builtin(), PipelineConfig::default()).unwrap()
    }

    /// Search provider that reports a missing API key
    struct UnconfiguredSearch;

    #[async_trait]
    impl SearchProvider for UnconfiguredSearch {
        type Error = SearchError;

        async fn search(&self, _query: &str) -> Result<Vec<EvidenceItem>, Self::Error> {
            Err(SearchError::MissingCredential("TAVILY_API_KEY".to_string()))
        }
    }

    /// History store whose writes always fail
    #[derive(Default)]
    struct FullDiskStore {
        attempts: usize,
    }

    impl HistoryStore for FullDiskStore {
        type Error = StoreError;

        fn record(&mut self, _entry: &HistoryEntry) -> Result<i64, Self::Error> {
            self.attempts += 1;
            Err(StoreError::InvalidData("disk full".to_string()))
        }

        fn recent(&self, _limit: Option<usize>) -> Result<Vec<HistoryEntry>, Self::Error> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_full_fact_check_flow() {
        let llm = MockProvider::new(format!("```json\n{}\n```", TRUE_REPLY));
        let checker = checker(MockSearchProvider::new(eiffel_evidence()), llm);

        let result = checker.check("The Eiffel Tower is in Paris").await.unwrap();

        assert_eq!(result.verdict, "True");
        assert_eq!(result.confidence, "High");
        assert_eq!(result.reason, "Multiple sources place it in Paris.");
        assert_eq!(result.additional_context, "Built 1887-1889.");
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0].title, "Eiffel Tower - Wikipedia");
        assert_eq!(result.sources[0].url, "https://en.wikipedia.org/wiki/Eiffel_Tower");
        assert_eq!(result.sources[1].url, "https://www.toureiffel.paris/en");
    }

    #[tokio::test]
    async fn test_false_statement_end_to_end() {
        let search = MockSearchProvider::new(vec![EvidenceItem::new(
            "Eiffel Tower — Wikipedia",
            "https://en.wikipedia.org/wiki/Eiffel_Tower",
            "...located in Paris, France...",
            0.9,
        )]);
        let llm = MockProvider::new(
            "```json\n{\"verdict\":\"False\",\"confidence\":\"High\",\"reason\":\"The Eiffel Tower is located in Paris, not Berlin.\",\"additional_context\":\"\"}\n```",
        );
        let checker = checker(search, llm.clone());

        let result = checker.check("The Eiffel Tower is in Berlin.").await.unwrap();

        assert_eq!(result.verdict, "False");
        assert_eq!(result.confidence, "High");
        assert_eq!(result.reason, "The Eiffel Tower is located in Paris, not Berlin.");
        assert_eq!(result.additional_context, "");
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "Eiffel Tower — Wikipedia");
        assert_eq!(result.sources[0].url, "https://en.wikipedia.org/wiki/Eiffel_Tower");

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Source: https://en.wikipedia.org/wiki/Eiffel_Tower, Content: ...located in Paris, France..."));
        assert!(prompt.contains("The Eiffel Tower is in Berlin."));
    }

    #[tokio::test]
    async fn test_model_sources_are_discarded() {
        let reply = r#"{"verdict":"False","confidence":"Low","reason":"r","additional_context":"c","sources":[{"title":"made up","url":"https://nowhere.invalid"}]}"#;
        let checker = checker(MockSearchProvider::new(eiffel_evidence()), MockProvider::new(reply));

        let result = checker.check("claim").await.unwrap();

        assert_eq!(result.sources.len(), 2);
        assert!(result.sources.iter().all(|s| s.url != "https://nowhere.invalid"));
    }

    #[tokio::test]
    async fn test_empty_generation_is_generation_error() {
        let checker = checker(MockSearchProvider::new(eiffel_evidence()), MockProvider::empty());

        let result = checker.check("claim").await;
        assert!(matches!(result, Err(PipelineError::Generation(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let checker = checker(
            MockSearchProvider::new(eiffel_evidence()),
            MockProvider::new("not json at all"),
        );

        let err = checker.check("claim").await.unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
        assert_eq!(err.raw_output(), Some("not json at all"));
        assert!(err.to_string().contains("not json at all"));
    }

    #[tokio::test]
    async fn test_missing_field_is_parse_error() {
        let reply = r#"{"verdict":"True","confidence":"High","reason":"r"}"#;
        let checker = checker(MockSearchProvider::new(eiffel_evidence()), MockProvider::new(reply));

        let err = checker.check("claim").await.unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
        assert!(err.to_string().contains("additional_context"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timeout() {
        let llm = MockProvider::new(TRUE_REPLY).with_delay(Duration::from_secs(60));
        let checker = checker(MockSearchProvider::new(eiffel_evidence()), llm.clone());

        let result = checker.check("claim").await;

        assert!(matches!(result, Err(PipelineError::Generation(msg)) if msg.contains("timed out")));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_timeout_skips_generation() {
        let search = MockSearchProvider::new(eiffel_evidence()).with_delay(Duration::from_secs(60));
        let llm = MockProvider::new(TRUE_REPLY);
        let checker = checker(search, llm.clone());

        let result = checker.check("claim").await;

        assert!(matches!(result, Err(PipelineError::Retrieval(msg)) if msg.contains("timed out")));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_deadline_cancels_run() {
        let search = MockSearchProvider::new(eiffel_evidence()).with_delay(Duration::from_secs(5));
        let llm = MockProvider::new(TRUE_REPLY);
        let checker = checker(search, llm.clone());

        let outcome = tokio::time::timeout(Duration::from_secs(1), checker.check("claim")).await;

        assert!(outcome.is_err());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_skips_generation() {
        let llm = MockProvider::new(TRUE_REPLY);
        let checker = checker(MockSearchProvider::failing(), llm.clone());

        let result = checker.check("claim").await;

        assert!(matches!(result, Err(PipelineError::Retrieval(msg)) if msg.contains("Mock error")));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let checker = FactChecker::new(
            UnconfiguredSearch,
            MockProvider::new(TRUE_REPLY),
            PromptTemplate::builtin(),
            PipelineConfig::default(),
        )
        .unwrap();

        let result = checker.check("claim").await;
        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_custom_template_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "EVIDENCE:\n{evidence}\nCLAIM: {statement}\n").unwrap();

        let llm = MockProvider::new(TRUE_REPLY);
        let config = PipelineConfig {
            template_path: Some(path),
            ..PipelineConfig::default()
        };
        let checker =
            FactChecker::from_config(MockSearchProvider::new(eiffel_evidence()), llm.clone(), config).unwrap();

        checker.check("The Eiffel Tower is in Paris").await.unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.starts_with("EVIDENCE:\nSource: https://en.wikipedia.org/wiki/Eiffel_Tower"));
        assert!(prompt.ends_with("CLAIM: The Eiffel Tower is in Paris\n"));
    }

    #[test]
    fn test_missing_template_file_is_configuration_error() {
        let config = PipelineConfig {
            template_path: Some("/nonexistent/prompt.txt".into()),
            ..PipelineConfig::default()
        };
        let result = FactChecker::from_config(
            MockSearchProvider::new(vec![]),
            MockProvider::new(TRUE_REPLY),
            config,
        );
        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_successful_checks_are_recorded() {
        let store = Arc::new(Mutex::new(SqliteHistoryStore::new(":memory:").unwrap()));
        let checker = checker(
            MockSearchProvider::new(eiffel_evidence()),
            MockProvider::new(TRUE_REPLY),
        )
        .with_history(Arc::clone(&store));

        checker.check("The Eiffel Tower is in Paris").await.unwrap();

        let entries = store.lock().unwrap().recent(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].statement, "The Eiffel Tower is in Paris");
        assert_eq!(entries[0].result.verdict, "True");
        assert_eq!(entries[0].result.sources.len(), 2);
    }

    #[tokio::test]
    async fn test_history_write_failure_still_returns_verdict() {
        let store = Arc::new(Mutex::new(FullDiskStore::default()));
        let checker = checker(
            MockSearchProvider::new(eiffel_evidence()),
            MockProvider::new(TRUE_REPLY),
        )
        .with_history(Arc::clone(&store));

        let result = checker.check("The Eiffel Tower is in Paris").await.unwrap();

        assert_eq!(result.verdict, "True");
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0].url, "https://en.wikipedia.org/wiki/Eiffel_Tower");
        assert_eq!(store.lock().unwrap().attempts, 1);
    }

    #[tokio::test]
    async fn test_failed_checks_are_not_recorded() {
        let store = Arc::new(Mutex::new(SqliteHistoryStore::new(":memory:").unwrap()));
        let checker = checker(
            MockSearchProvider::new(eiffel_evidence()),
            MockProvider::new("garbage"),
        )
        .with_history(Arc::clone(&store));

        assert!(checker.check("claim").await.is_err());
        assert!(store.lock().unwrap().recent(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_checks_are_independent() {
        let llm = MockProvider::new(TRUE_REPLY);
        let checker = Arc::new(checker(MockSearchProvider::new(eiffel_evidence()), llm.clone()));

        let a = tokio::spawn({
            let checker = Arc::clone(&checker);
            async move { checker.check("first claim").await }
        });
        let b = tokio::spawn({
            let checker = Arc::clone(&checker);
            async move { checker.check("second claim").await }
        });

        assert!(a.await.unwrap().is_ok());
        assert!(b.await.unwrap().is_ok());
        assert_eq!(llm.call_count(), 2);
    }
}
