//! End-to-end pipeline tests against the mock collaborators.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use travel_assistant::testing::MockBackendCall;
use travel_assistant::{
    ContentAggregator, ErrorKind, FailureStage, MockBackend, MockDecoder, MockTranscriptService,
    PipelineConfig, PipelineRequest, Source, SourceExtractor, TravelAssistant,
};

fn paris_fixtures() -> (MockDecoder, MockTranscriptService) {
    let decoder = MockDecoder::new().with_document(
        b"paris-guide.pdf".to_vec(),
        vec!["Paris is the capital of France.", "The Louvre is a museum."],
    );
    let transcripts = MockTranscriptService::new()
        .with_transcript("eiffel-sunset", &["Visit the Eiffel Tower", "at sunset."]);
    (decoder, transcripts)
}

#[tokio::test]
async fn test_paris_round_trip() {
    let (decoder, transcripts) = paris_fixtures();
    let backend = MockBackend::new();
    let extractor = SourceExtractor::new(Arc::new(decoder), Arc::new(transcripts));
    let assistant = TravelAssistant::new(extractor, Arc::new(backend.clone()));

    let sources = vec![
        Source::named_document("paris-guide.pdf", b"paris-guide.pdf".to_vec()),
        Source::transcript("eiffel-sunset"),
    ];

    let content = assistant.aggregator().aggregate(sources.clone()).await;
    assert_eq!(
        content.combined_text,
        "Paris is the capital of France.The Louvre is a museum.Visit the Eiffel Tower at sunset."
    );

    let result = assistant
        .run(PipelineRequest::new(sources).with_question("What museum is mentioned?"))
        .await;

    assert!(result.summary.is_some());
    assert!(result.answer.as_deref().unwrap().contains("Louvre"));
    assert!(result.failures.is_empty());
    assert!(result.is_success());

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&MockBackendCall::Answer {
        text_len: content.combined_text.len(),
        question: "What museum is mentioned?".to_string(),
    }));
}

#[tokio::test]
async fn test_partial_failure_still_answers() {
    let (decoder, transcripts) = paris_fixtures();
    let extractor = SourceExtractor::new(Arc::new(decoder), Arc::new(transcripts));
    let assistant = TravelAssistant::new(extractor, Arc::new(MockBackend::new()));

    let result = assistant
        .run(
            PipelineRequest::new(vec![
                Source::named_document("scan.pdf", b"not a pdf".to_vec()),
                Source::named_document("paris-guide.pdf", b"paris-guide.pdf".to_vec()),
                Source::transcript("private-video"),
            ])
            .with_question("Which museum should I see?"),
        )
        .await;

    assert_eq!(result.answer.as_deref(), Some("The Louvre is a museum."));
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].kind, ErrorKind::DecodeFailure);
    assert!(matches!(
        result.failures[0].stage,
        FailureStage::Source { index: 0, .. }
    ));
    assert_eq!(result.failures[1].kind, ErrorKind::SourceUnavailable);
    assert!(matches!(
        result.failures[1].stage,
        FailureStage::Source { index: 2, .. }
    ));
}

#[tokio::test]
async fn test_inference_skipped_without_text() {
    let decoder = MockDecoder::new().with_document(b"blank".to_vec(), vec!["", ""]);
    let backend = MockBackend::new();
    let extractor = SourceExtractor::new(Arc::new(decoder), Arc::new(MockTranscriptService::new()));
    let assistant = TravelAssistant::new(extractor, Arc::new(backend.clone()));

    let result = assistant
        .run(PipelineRequest::new(vec![Source::document(b"blank".to_vec())]).with_question("Why?"))
        .await;

    assert!(result.is_empty());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_concurrent_runs_share_one_assistant() {
    let (decoder, transcripts) = paris_fixtures();
    let extractor = SourceExtractor::new(Arc::new(decoder), Arc::new(transcripts));
    let assistant = TravelAssistant::new(extractor, Arc::new(MockBackend::new()));

    let first = assistant.run(
        PipelineRequest::new(vec![Source::document(b"paris-guide.pdf".to_vec())])
            .with_question("What is the capital of France?"),
    );
    let second = assistant.run(
        PipelineRequest::new(vec![Source::transcript("eiffel-sunset")])
            .with_question("When to visit the Eiffel Tower?"),
    );
    let (first, second) = tokio::join!(first, second);

    assert_eq!(
        first.answer.as_deref(),
        Some("Paris is the capital of France.")
    );
    assert_eq!(
        second.answer.as_deref(),
        Some("Visit the Eiffel Tower at sunset.")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Combined text follows input order whatever the per-source latency.
    #[test]
    fn prop_combined_text_preserves_input_order(
        delays in prop::collection::vec(0u64..15, 1..8),
        concurrency in 1usize..6,
    ) {
        let mut transcripts = MockTranscriptService::new();
        let mut sources = Vec::new();
        let mut expected = String::new();

        for (i, delay) in delays.iter().enumerate() {
            let id = format!("video-{i}");
            let line = format!("[{i}]");
            transcripts = transcripts
                .with_transcript(id.clone(), &[line.as_str()])
                .with_delay(id.clone(), Duration::from_millis(*delay));
            sources.push(Source::transcript(id));
            expected.push_str(&line);
        }

        let aggregator = ContentAggregator::new(
            SourceExtractor::new(Arc::new(MockDecoder::new()), Arc::new(transcripts)),
            &PipelineConfig::new().with_concurrency(concurrency),
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()
            .unwrap();
        let content = runtime.block_on(aggregator.aggregate(sources));

        prop_assert_eq!(content.combined_text, expected);
        prop_assert!(content.failures.is_empty());
    }
}
