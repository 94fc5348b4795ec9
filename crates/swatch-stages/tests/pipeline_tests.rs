mod common;

use common::*;
use swatch_core::color::{contrast_ratio, contrast_threshold};
use swatch_core::{AttemptFailure, OutputShape, SwatchError};
use swatch_in::{RequestOptions, RequestSpec};
use swatch_stages::fallback;

fn assert_contrast_bound(artifact: &swatch_core::Artifact) {
    let text = artifact.text().expect("text role");
    let background = artifact.background().expect("background role");
    let ratio = contrast_ratio(&text.hex, &background.hex).unwrap();
    assert!(
        ratio >= contrast_threshold(artifact.accessibility.level),
        "contrast {} below {}",
        ratio,
        artifact.accessibility.level
    );
}

#[tokio::test]
async fn test_invalid_parameters_make_no_calls() {
    let script = ScriptedCompletion::always(FULL_RESPONSE);
    let generator = generator(&script);

    let cases = [
        (RequestOptions::new().mood("grumpy"), "mood"),
        (RequestOptions::new().industry("mining"), "industry"),
        (RequestOptions::new().accessibility_level("AAAA"), "accessibilityLevel"),
        (RequestOptions::new().free_text("Use #12345 as base"), "baseColor"),
    ];
    for (options, expected_field) in cases {
        match generator.generate(&options).await {
            Err(SwatchError::InvalidParameter { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidParameter({}), got {:?}", expected_field, other),
        }
    }
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_full_palette_accepted_first_try() {
    let script = ScriptedCompletion::always(FULL_RESPONSE);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new().mood("cool"))
        .await
        .unwrap();

    let artifact = &outcome.artifact;
    assert!(!artifact.is_fallback());
    assert_eq!(artifact.shape, OutputShape::Full);
    assert_eq!(artifact.name, "Ocean Tech");
    assert_eq!(artifact.colors.len(), 8);
    assert_eq!(artifact.primary().unwrap().hex, "#0EA5E9");
    assert_eq!(artifact.primary().unwrap().rgb.g, 165);
    assert!(artifact.gradients.contains_key("hero"));
    assert_eq!(artifact.mood, "cool");
    assert_contrast_bound(artifact);

    assert!(!outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 1);
    assert_eq!(outcome.report.total_calls(), 1);
    let record = &outcome.report.attempts[0];
    assert!(record.prompt_hash.as_deref().unwrap().starts_with("blake3:"));
    assert!(record.completion_hash.is_some());
    assert_eq!(record.model.as_deref(), Some("primary-model"));
    assert!(record.failure.is_none());
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_sunset_five_colors_end_to_end() {
    let script = ScriptedCompletion::always(SUNSET_RESPONSE);
    let options = RequestOptions::new()
        .mood("playful")
        .industry("technology")
        .free_text("Use #FF5733 as base. 5 colors.");
    let artifact = generator(&script).generate(&options).await.unwrap();

    assert_eq!(artifact.shape, OutputShape::Simple);
    assert_eq!(artifact.colors.len(), 5);
    assert!(artifact.colors.values().any(|c| c.hex == "#FF5733"));
    assert_eq!(artifact.primary().unwrap().hex, "#FF5733");
    assert_eq!(artifact.background().unwrap().hex, "#FFF8F0");
    assert_eq!(artifact.text().unwrap().hex, "#1B1B1B");
    assert!(artifact.accessibility.contrast_ratio >= 4.5);
    assert!(artifact.accessibility.wcag_compliant);
    assert_eq!(artifact.tags, vec!["playful", "technology"]);
    assert_contrast_bound(&artifact);

    let prompt = &script.prompts()[0];
    assert!(prompt.contains("EXACTLY 5 colors"));
    assert!(prompt.contains("#FF5733"));
}

#[tokio::test]
async fn test_full_palette_missing_base_color_falls_back() {
    let script = ScriptedCompletion::always(FULL_RESPONSE);
    let options = RequestOptions::new().free_text("Use #FF5733 as base.");
    let outcome = generator(&script).generate_with_report(&options).await.unwrap();

    assert!(outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 3);
    assert!(outcome.report.failures().all(|f| matches!(
        f,
        AttemptFailure::Invalid(errors) if errors == &vec!["base color #FF5733 missing from palette".to_string()]
    )));
    assert_eq!(outcome.artifact.shape, OutputShape::Full);
    assert_eq!(outcome.artifact.primary().unwrap().hex, "#FF5733");
}

#[tokio::test]
async fn test_full_palette_binds_base_color_as_primary() {
    let with_base = r##"{
      "name": "Ember Tech",
      "description": "Warm accents on cool neutrals",
      "colors": {
        "primary": "#0EA5E9",
        "brand": "#ff5733",
        "accent": "#F472B6",
        "background": "#F8FAFC",
        "surface": "#E2E8F0",
        "text": "#0F172A",
        "textSecondary": "#475569",
        "border": "#CBD5E1"
      },
      "tags": ["ember"]
    }"##;
    let script = ScriptedCompletion::always(with_base);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new().free_text("Use #FF5733 as base."))
        .await
        .unwrap();

    assert!(!outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 1);
    assert!(outcome.report.attempts[0].warnings.is_empty(), "{:?}", outcome.report.attempts[0].warnings);
    assert_eq!(outcome.artifact.roles.primary.as_deref(), Some("brand"));
    assert_eq!(outcome.artifact.primary().unwrap().hex, "#FF5733");
    assert!(outcome.report.attempts[0]
        .repairs
        .contains(&"designated 'brand' as primary".to_string()));
}

#[tokio::test]
async fn test_simple_palette_missing_base_color_falls_back() {
    let without_base = r##"["#FFF8F0", "#C70039", "#581845", "#900C3F", "#1B1B1B"]"##;
    let script = ScriptedCompletion::always(without_base);
    let artifact = generator(&script)
        .generate(&RequestOptions::new().free_text("Use #FF5733 as base. 5 colors."))
        .await
        .unwrap();

    assert!(artifact.is_fallback());
    assert_eq!(artifact.colors.len(), 5);
    assert_eq!(artifact.primary().unwrap().hex, "#FF5733");
}

#[tokio::test]
async fn test_six_colors_shape_conformance() {
    let six = r##"["#FFFFFF", "#2563EB", "#7C3AED", "#F59E0B", "#10B981", "#111827"]"##;
    let script = ScriptedCompletion::always(six);
    let artifact = generator(&script)
        .generate(&RequestOptions::new().free_text("Give me 6 colors"))
        .await
        .unwrap();

    assert_eq!(artifact.shape, OutputShape::Simple);
    assert_eq!(artifact.colors.len(), 6);
    let keys: Vec<&str> = artifact.colors.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["color1", "color2", "color3", "color4", "color5", "color6"]);
    assert!(artifact.interactive_states.is_empty());
    assert!(!artifact.is_fallback());
}

#[tokio::test]
async fn test_wrong_count_falls_back_to_exact_count() {
    let eight = r##"["#FFFFFF", "#2563EB", "#7C3AED", "#F59E0B", "#10B981", "#EF4444", "#0891B2", "#111827"]"##;
    let script = ScriptedCompletion::always(eight);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new().free_text("6 colors please"))
        .await
        .unwrap();

    assert!(outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 3);
    assert!(matches!(
        &outcome.report.attempts[0].failure,
        Some(AttemptFailure::Invalid(errors)) if errors == &vec!["expected exactly 6 colors, got 8".to_string()]
    ));
    assert_eq!(outcome.artifact.colors.len(), 6);
    assert!(outcome.artifact.is_fallback());
    assert_eq!(script.calls(), 3);
}

#[tokio::test]
async fn test_permanent_failures_yield_deterministic_fallback() {
    let script = ScriptedCompletion::failing("invalid api key");
    let options = RequestOptions::new().mood("elegant").industry("fashion");
    let generator = generator(&script);

    let outcome = generator.generate_with_report(&options).await.unwrap();
    assert!(outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 3);
    assert!(outcome
        .report
        .failures()
        .all(|f| matches!(f, AttemptFailure::Generation(msg) if msg.contains("invalid api key"))));
    // primary once (permanent, no retries) + fallback model once, per attempt
    assert_eq!(outcome.report.total_calls(), 6);
    assert_eq!(script.calls(), 6);
    assert_eq!(
        &script.models()[..2],
        &["primary-model".to_string(), "fallback-model".to_string()]
    );

    let spec = RequestSpec::from_options(&options).unwrap();
    assert_eq!(outcome.artifact, fallback::synthesize(&spec));
    assert_eq!(outcome.artifact.primary().unwrap().hex, "#2563EB");
    assert_eq!(outcome.artifact.background().unwrap().hex, "#FFFFFF");
    assert_eq!(outcome.artifact.text().unwrap().hex, "#111827");
    assert_contrast_bound(&outcome.artifact);

    let again = generator.generate(&options).await.unwrap();
    assert_eq!(again, outcome.artifact);
}

#[tokio::test]
async fn test_transient_failures_retry_same_model() {
    let script = ScriptedCompletion::new(vec![fail("503 Service Unavailable"), fail("model overloaded"), ok(FULL_RESPONSE)]);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new())
        .await
        .unwrap();

    assert!(!outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 1);
    assert_eq!(outcome.report.attempts[0].calls, 3);
    assert!(!outcome.report.attempts[0].escalated);
    assert_eq!(script.models(), vec!["primary-model"; 3]);
}

#[tokio::test]
async fn test_exhausted_retries_escalate_to_fallback_model() {
    let script = ScriptedCompletion::new(vec![fail("timeout"), fail("timeout"), fail("timeout"), ok(FULL_RESPONSE)]);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new())
        .await
        .unwrap();

    let record = &outcome.report.attempts[0];
    assert!(record.escalated);
    assert_eq!(record.model.as_deref(), Some("fallback-model"));
    assert_eq!(record.calls, 4);
    assert!(!outcome.artifact.is_fallback());
}

#[tokio::test]
async fn test_model_hint_passed_through() {
    let script = ScriptedCompletion::always(FULL_RESPONSE);
    generator(&script)
        .generate(&RequestOptions::new().model("experimental-7"))
        .await
        .unwrap();
    assert_eq!(script.models(), vec!["experimental-7"]);
}

#[tokio::test]
async fn test_low_contrast_retried_then_accepted() {
    let script = ScriptedCompletion::new(vec![ok(LOW_CONTRAST_RESPONSE), ok(FULL_RESPONSE)]);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(outcome.report.attempts.len(), 2);
    match &outcome.report.attempts[0].failure {
        Some(AttemptFailure::Invalid(errors)) => assert!(errors[0].contains("below AA minimum 4.5:1")),
        other => panic!("expected contrast failure, got {:?}", other),
    }
    assert_eq!(outcome.artifact.name, "Ocean Tech");
    assert_contrast_bound(&outcome.artifact);
}

#[tokio::test]
async fn test_aaa_request_never_returns_aa_only_palette() {
    // #767676 on white passes AA (~4.54:1) but not AAA
    let aa_only = r##"{"colors": {"primary": "#0EA5E9", "background": "#FFFFFF", "text": "#767676"}}"##;
    let script = ScriptedCompletion::always(aa_only);
    let artifact = generator(&script)
        .generate(&RequestOptions::new().accessibility_level("aaa"))
        .await
        .unwrap();

    assert!(artifact.is_fallback());
    assert_eq!(artifact.accessibility.level, swatch_core::AccessibilityLevel::AAA);
    assert!(artifact.accessibility.contrast_ratio >= 7.0);
    assert_contrast_bound(&artifact);
}

#[tokio::test]
async fn test_unparsable_then_valid() {
    let script = ScriptedCompletion::new(vec![ok("Sorry, I cannot help with palettes today."), ok(FULL_RESPONSE)]);
    let outcome = generator(&script)
        .generate_with_report(&RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(outcome.report.attempts.len(), 2);
    assert_eq!(outcome.report.attempts[0].failure.as_ref().map(|f| f.label()), Some("unparsable"));
    assert!(outcome.report.attempts[1].failure.is_none());
    assert!(!outcome.report.attempts[1].repairs.is_empty());
}

#[tokio::test]
async fn test_single_attempt_config() {
    let script = ScriptedCompletion::always("not json");
    let mut config = fast_config();
    config.max_attempts = 1;
    let generator = swatch_stages::PaletteGenerator::new(script.clone(), config).unwrap();

    let outcome = generator.generate_with_report(&RequestOptions::new()).await.unwrap();
    assert!(outcome.report.fallback_used);
    assert_eq!(outcome.report.attempts.len(), 1);
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_generator_shared_across_tasks() {
    let script = ScriptedCompletion::always(FULL_RESPONSE);
    let generator = std::sync::Arc::new(generator(&script));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = generator.clone();
            tokio::spawn(async move { generator.generate(&RequestOptions::new()).await })
        })
        .collect();
    for handle in handles {
        let artifact = handle.await.unwrap().unwrap();
        assert_eq!(artifact.name, "Ocean Tech");
    }
    assert_eq!(script.calls(), 4);
}
