use swatch_core::SwatchError;
use swatch_in::{RequestOptions, RequestSpec};
use swatch_out::{compose, PromptComposer};

const TEMPLATES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/prompt-templates.yaml");

#[test]
fn test_templates_on_disk_match_embedded() {
    let spec = RequestSpec::from_options(&RequestOptions::new().mood("vintage").industry("travel")).unwrap();
    let from_disk = PromptComposer::load(TEMPLATES_PATH).unwrap().compose(&spec).unwrap();
    assert_eq!(from_disk, compose(&spec).unwrap());
}

#[test]
fn test_missing_templates_file() {
    let err = PromptComposer::load("/nonexistent/prompt-templates.yaml").err().unwrap();
    assert!(matches!(err, SwatchError::Template(_)));
}

#[test]
fn test_no_html_escaping() {
    let spec = RequestSpec::from_options(&RequestOptions::new().free_text("Use <b>bold</b> & \"quoted\" accents")).unwrap();
    let prompt = compose(&spec).unwrap();
    assert!(prompt.requirements.contains("<b>bold</b> & \"quoted\""));
    assert!(!prompt.to_string().contains("&quot;"));
}
