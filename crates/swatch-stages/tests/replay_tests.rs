use std::sync::Arc;
use swatch_core::AttemptFailure;
use swatch_in::RequestOptions;
use swatch_stages::{GeneratorConfig, PaletteGenerator, ReplayCompletion};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../testing/fixtures/replay");

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{}/{}", FIXTURES, name)).unwrap()
}

#[tokio::test]
async fn test_replay_recovers_from_truncated_completion() {
    let options: RequestOptions = serde_json::from_str(&fixture("request.json")).unwrap();
    let replay = Arc::new(ReplayCompletion::new(vec![
        fixture("completion-truncated.txt"),
        fixture("completion-ok.txt"),
    ]));
    let generator = PaletteGenerator::new(replay.clone(), GeneratorConfig::default().without_backoff()).unwrap();

    let outcome = generator.generate_with_report(&options).await.unwrap();
    assert_eq!(replay.served(), 2);
    assert_eq!(outcome.report.attempts.len(), 2);
    assert!(matches!(outcome.report.attempts[0].failure, Some(AttemptFailure::Unparsable(_))));

    let artifact = outcome.artifact;
    assert_eq!(artifact.name, "Sunset Pop");
    assert_eq!(artifact.colors.len(), 5);
    assert_eq!(artifact.primary().unwrap().hex, "#FF5733");
    assert_eq!(artifact.tags, vec!["sunset", "beach", "playful"]);
}

#[tokio::test]
async fn test_outcome_serializes_for_operators() {
    let options: RequestOptions = serde_json::from_str(&fixture("request.json")).unwrap();
    let replay = Arc::new(ReplayCompletion::new(vec![fixture("completion-ok.txt")]));
    let generator = PaletteGenerator::new(replay, GeneratorConfig::default().without_backoff()).unwrap();

    let outcome = generator.generate_with_report(&options).await.unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["artifact"]["shape"], "simple");
    assert_eq!(json["report"]["fallback_used"], false);
    assert_eq!(json["report"]["attempts"][0]["attempt"], 1);
    assert!(json["report"]["trace_id"].as_str().is_some_and(|id| id.len() == 36));
}
