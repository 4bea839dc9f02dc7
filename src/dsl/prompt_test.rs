//! Tests for the prompt registry.

use super::*;
use crate::error::PromptOpsError;
use proptest::prelude::*;
use serde_json::json;

const ID: &str = "22222222-2222-4222-8222-222222222222";
const FW: &str = "11111111-1111-1111-8111-111111111111";

#[test]
fn parse_minimal_latest() {
    let p = parse_prompt(json!({"version": 2, "id": ID, "template": "Hi {{name}}"})).unwrap();
    assert_eq!(p.version, 2);
    assert_eq!(p.template, "Hi {{name}}");
    assert!(p.inputs.is_empty());
    assert!(p.tags.is_empty());
    assert_eq!(latest_prompt_version(), 2);
}

#[test]
fn parse_full_document() {
    let yaml = format!(
        r#"
version: 2
id: {ID}
slug: greet
name: Greeting
template: "Hello {{{{ who }}}}"
inputs:
  - name: who
    type: string
    required: true
    default: world
    description: target
model:
  provider: openai
  name: gpt-4o
enums:
  tone: [formal, casual]
labels:
  formal:
    ja: 丁寧
tests:
  - name: basic
    with:
      who: Alice
    assert:
      contains: [Alice]
      maxTokens: 100
tags: [demo]
frameworkRef: {FW}
"#
    );
    let p = parse_prompt(yaml.as_str()).unwrap();
    assert_eq!(p.name.as_deref(), Some("Greeting"));
    assert_eq!(p.inputs[0].input_type, InputType::String);
    assert!(p.inputs[0].required);
    assert_eq!(p.inputs[0].default, Some(json!("world")));
    assert_eq!(p.model.as_ref().unwrap().provider, "openai");
    assert_eq!(p.enums.as_ref().unwrap()["tone"], ["formal", "casual"]);
    assert_eq!(p.labels.as_ref().unwrap()["formal"]["ja"], "丁寧");
    let tests = p.tests.as_ref().unwrap();
    assert_eq!(tests[0].with_values["who"], json!("Alice"));
    assert_eq!(tests[0].assert.max_tokens, Some(100));
    assert_eq!(p.tags, ["demo"]);
    assert_eq!(p.framework_ref.as_deref(), Some(FW));
}

#[test]
fn input_required_defaults_to_false() {
    let p = parse_prompt(json!({
        "version": 2, "id": ID, "template": "t",
        "inputs": [{"name": "a", "type": "number"}],
    }))
    .unwrap();
    assert!(!p.inputs[0].required);
}

#[test]
fn migrate_versionless_prompt() {
    let p = parse_prompt(json!({"id": ID, "template": "t", "tags": ["x"]})).unwrap();
    assert_eq!(p.version, 2);
    assert_eq!(p.tags, ["x"]);
}

#[test]
fn unsupported_future_version() {
    let err = parse_prompt(json!({"version": 9, "id": ID, "template": "t"})).unwrap_err();
    assert!(matches!(
        err,
        PromptOpsError::UnsupportedVersion {
            kind: DocumentKind::Prompt,
            version: 9
        }
    ));
}

#[test]
fn rejects_invalid_documents() {
    let cases = [
        json!({"version": 2, "id": ID}),
        json!({"version": 2, "id": ID, "template": ""}),
        json!({"version": 2, "id": ID, "template": "t", "name": ""}),
        json!({"version": 2, "id": "p1", "template": "t"}),
        json!({"version": 2, "id": ID, "template": "t", "unknown": true}),
        json!({"version": 2, "id": ID, "template": "t", "inputs": [{"name": "a", "type": "date"}]}),
        json!({"version": 2, "id": ID, "template": "t", "inputs": [{"name": "", "type": "string"}]}),
        json!({"version": 2, "id": ID, "template": "t", "model": {"provider": "x"}}),
        json!({"version": 2, "id": ID, "template": "t", "tests": [{"name": "n", "assert": {"maxTokens": 0}}]}),
        json!({"id": ID, "template": "t", "bogus": 1}),
    ];
    for case in cases {
        let err = parse_prompt(case.clone()).unwrap_err();
        assert!(matches!(err, PromptOpsError::Schema(_)), "{:?}", case);
    }
}

#[test]
fn dump_orders_fields_and_omits_absent() {
    let mut p = PromptDsl::new(ID, "body");
    p.framework_ref = Some(FW.to_string());
    p.name = Some("n".to_string());
    let yaml = dump_prompt(&p).unwrap();
    let keys: Vec<&str> = yaml
        .lines()
        .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
        .filter_map(|l| l.split(':').next())
        .collect();
    assert_eq!(
        keys,
        ["version", "id", "name", "template", "inputs", "tags", "frameworkRef"]
    );
}

fn input_strategy() -> impl Strategy<Value = PromptInput> {
    (
        "[a-z][a-z0-9_]{0,8}",
        prop_oneof![
            Just(InputType::String),
            Just(InputType::Number),
            Just(InputType::Boolean),
        ],
        any::<bool>(),
        proptest::option::of("[a-zA-Z ]{1,10}"),
    )
        .prop_map(|(name, input_type, required, default)| {
            let input = PromptInput::new(name, input_type).with_required(required);
            match default {
                Some(d) => input.with_default(d),
                None => input,
            }
        })
}

fn prompt_strategy() -> impl Strategy<Value = PromptDsl> {
    (
        any::<u128>(),
        proptest::option::of("[a-zA-Z0-9][a-zA-Z0-9 .,!?-]{0,19}"),
        "[a-zA-Z0-9][a-zA-Z0-9 .,:#'!?{}\n-]{0,80}",
        proptest::collection::vec(input_strategy(), 0..3),
        proptest::collection::vec("[a-z]{1,8}", 0..3),
        proptest::option::of(any::<u128>()),
    )
        .prop_map(|(id, name, template, inputs, tags, fw)| {
            let mut p = PromptDsl::new(uuid::Uuid::from_u128(id).to_string(), template);
            p.name = name;
            p.inputs = inputs;
            p.tags = tags;
            p.framework_ref = fw.map(|f| uuid::Uuid::from_u128(f).to_string());
            p
        })
}

proptest! {
    /// parse(dump(d)) == d
    #[test]
    fn prop_dump_parse_round_trip(p in prompt_strategy()) {
        let yaml = dump_prompt(&p).unwrap();
        let parsed = parse_prompt(yaml.as_str()).unwrap();
        prop_assert_eq!(&parsed, &p);
        prop_assert_eq!(dump_prompt(&parsed).unwrap(), yaml);
    }

    #[test]
    fn prop_migration_idempotent(p in prompt_strategy()) {
        let mut legacy = serde_json::to_value(&p).unwrap();
        legacy.as_object_mut().unwrap().remove("version");

        let once = parse_prompt(legacy).unwrap();
        let twice = parse_prompt(serde_json::to_value(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
