//! Integration tests for domain-pilot

use async_trait::async_trait;
use domain_pilot::{
    config::SimulationConfig,
    domain::{normalize, purchase_link},
    error::Result,
    AvailabilityStatus, DescriptionInput, DomainPilotError, DomainPipeline, DomainSuggestion, GenerationRequest,
    NameGenerator, PipelineError, PurchaseLinkTemplate, QuestionnaireInput, SimulatedResolver, TldSet,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Returns a fixed candidate list and counts how often it was asked
struct StubGenerator {
    names: Vec<&'static str>,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new(names: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            names,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameGenerator for StubGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.names.iter().map(|s| s.to_string()).collect())
    }
}

struct FailingGenerator;

#[async_trait]
impl NameGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<String>> {
        Err(DomainPilotError::network("connection refused", None, None))
    }
}

fn resolver(seed: u64) -> Arc<SimulatedResolver> {
    let config = SimulationConfig {
        latency: Duration::ZERO,
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    Arc::new(SimulatedResolver::new(TldSet::default(), config).unwrap())
}

fn questionnaire() -> QuestionnaireInput {
    QuestionnaireInput::new(vec![
        "EcoPaws".to_string(),
        "pet supplies".to_string(),
        "dog owners".to_string(),
        "eco, sustainable".to_string(),
    ])
}

fn assert_full_tld_lists(suggestions: &[DomainSuggestion]) {
    let tld_set = TldSet::default();
    let expected: Vec<&str> = tld_set.iter().collect();
    for suggestion in suggestions {
        let tlds: Vec<&str> = suggestion.tlds.iter().map(|t| t.tld.as_str()).collect();
        assert_eq!(tlds, expected, "wrong TLD list for {}", suggestion.base_name);
    }
}

#[tokio::test]
async fn test_description_run_lists_every_tld_in_order() {
    let generator = StubGenerator::new(vec!["PawPlay", "EcoChew.com", "Green Fetch"]);
    let pipeline = DomainPipeline::new(generator.clone(), resolver(21));

    let input = DescriptionInput::new("A subscription box for eco-friendly dog toys", "sustainable, dog, play, eco");
    let suggestions = pipeline.run(input.into()).await.unwrap();
    assert_eq!(generator.calls(), 1);
    assert!(!suggestions.is_empty());
    assert_full_tld_lists(&suggestions);

    let names: Vec<&str> = suggestions.iter().map(|s| s.base_name.as_str()).collect();
    assert_eq!(names, vec!["pawplay", "ecochew", "green-fetch"]);
}

#[tokio::test]
async fn test_questionnaire_run_lists_every_tld_in_order() {
    let generator = StubGenerator::new(vec!["EcoPaws", "GreenTail", "BarkLeaf.io"]);
    let pipeline = DomainPipeline::new(generator.clone(), resolver(7));

    let suggestions = pipeline.run(questionnaire().into()).await.unwrap();
    assert_eq!(generator.calls(), 1);
    assert_eq!(suggestions.len(), 3);

    assert_full_tld_lists(&suggestions);
    for suggestion in &suggestions {
        for entry in &suggestion.tlds {
            assert_eq!(entry.available, entry.status == AvailabilityStatus::Available);
        }
        let first_available = suggestion.tlds.iter().find(|t| t.available).map(|t| t.tld.clone());
        assert_eq!(suggestion.preferred_tld, first_available);
    }

    let names: Vec<&str> = suggestions.iter().map(|s| s.base_name.as_str()).collect();
    assert_eq!(names, vec!["ecopaws", "greentail", "barkleaf"]);
}

#[tokio::test]
async fn test_empty_generation() {
    let generator = StubGenerator::new(vec![]);
    let pipeline = DomainPipeline::new(generator, resolver(1));

    let input = DescriptionInput::new("A subscription box for eco-friendly dog toys", "eco, dog");
    let err = pipeline.run(input.into()).await.unwrap_err();
    assert_eq!(err, PipelineError::EmptyGeneration);
    assert!(err.to_string().contains("could not generate domain names"));
}

#[tokio::test]
async fn test_spelling_variants_collapse_to_one_suggestion() {
    let generator = StubGenerator::new(vec!["EcoPaws.com", "Eco Paws", "ecopaws.io"]);
    let pipeline = DomainPipeline::new(generator, resolver(3));

    let input = DescriptionInput::new("A subscription box for eco-friendly dog toys", "eco, dog");
    let suggestions = pipeline.run(input.into()).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].base_name.as_str(), "ecopaws");
}

#[tokio::test]
async fn test_blank_answer_never_reaches_generator() {
    let generator = StubGenerator::new(vec!["ecopaws"]);
    let pipeline = DomainPipeline::new(generator.clone(), resolver(1));

    let input = QuestionnaireInput::new(vec![
        "EcoPaws".to_string(),
        "   ".to_string(),
        "dog owners".to_string(),
        "eco".to_string(),
    ]);
    let err = pipeline.run(input.into()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_short_description_rejected() {
    let generator = StubGenerator::new(vec!["ecopaws"]);
    let pipeline = DomainPipeline::new(generator.clone(), resolver(1));

    let err = pipeline.run(DescriptionInput::new("dogs", "").into()).await.unwrap_err();
    match err {
        PipelineError::Validation(message) => {
            assert!(message.contains("at least 10 characters"));
            assert!(message.contains("at least one keyword"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_generator_failure() {
    let pipeline = DomainPipeline::new(Arc::new(FailingGenerator), resolver(1));
    let err = pipeline.run(questionnaire().into()).await.unwrap_err();
    assert_eq!(err, PipelineError::Generation);
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_cancelled_before_generation() {
    let generator = StubGenerator::new(vec!["ecopaws"]);
    let pipeline = DomainPipeline::new(generator.clone(), resolver(1));

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = pipeline
        .run_with_cancellation(questionnaire().into(), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_cancelled_during_resolution() {
    let generator = StubGenerator::new(vec!["ecopaws"]);
    let slow = Arc::new(SimulatedResolver::new(
        TldSet::default(),
        SimulationConfig {
            latency: Duration::from_secs(30),
            seed: Some(1),
            ..SimulationConfig::default()
        },
    )
    .unwrap());
    let pipeline = DomainPipeline::new(generator.clone(), slow);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = pipeline
        .run_with_cancellation(questionnaire().into(), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err, PipelineError::Cancelled);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_same_seed_same_availability() {
    let names = vec!["ecopaws", "greentail"];
    let first = DomainPipeline::new(StubGenerator::new(names.clone()), resolver(42))
        .run(questionnaire().into())
        .await
        .unwrap();
    let second = DomainPipeline::new(StubGenerator::new(names), resolver(42))
        .run(questionnaire().into())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_purchase_link_follows_preferred_tld() {
    let generator = StubGenerator::new(vec!["ecopaws", "greentail", "barkleaf", "pawprint"]);
    let pipeline = DomainPipeline::new(generator, resolver(11));
    let template = PurchaseLinkTemplate::default();

    for suggestion in pipeline.run(questionnaire().into()).await.unwrap() {
        match (&suggestion.preferred_tld, purchase_link(&suggestion, &template)) {
            (Some(tld), Some(link)) => {
                assert!(link.ends_with(&format!("query={}{}", suggestion.base_name, tld)));
            }
            (None, None) => assert!(!suggestion.has_available()),
            other => panic!("preferred TLD and link disagree: {:?}", other),
        }
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let tlds = TldSet::default();
    for raw in ["EcoPaws.com", "  Eco Paws ", "a.com.io", "foo.bar.com", "Green-Tail!", "x.ai"] {
        let once = normalize(raw, &tlds);
        let twice = normalize(once.as_str(), &tlds);
        assert_eq!(once, twice, "normalize not idempotent for {:?}", raw);
        assert!(once
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.'));
    }
}

#[test]
fn test_help_flag() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    Command::cargo_bin("domain-pilot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("--keywords"));
}
