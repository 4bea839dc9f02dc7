//! Tests for the collection envelope.

use super::*;
use serde_json::json;

const FW_ID: &str = "11111111-1111-1111-8111-111111111111";
const PROMPT_ID: &str = "22222222-2222-4222-8222-222222222222";

fn stored_json() -> Value {
    json!({
        "providers": [{"name": "openai"}],
        "frameworks": [{
            "id": FW_ID,
            "content": {"id": FW_ID, "name": "legacy", "content": "body"},
            "order": 1,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }],
        "prompts": [{
            "id": PROMPT_ID,
            "content": {"version": 1, "id": PROMPT_ID, "template": "t"},
            "order": 3,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }],
        "settings": {"defaultFrameworkId": FW_ID, "version": "1.0.7", "theme": "dark"}
    })
}

#[test]
fn load_migrates_stored_documents() {
    let data: AppData = serde_json::from_value(stored_json()).unwrap();
    assert_eq!(data.frameworks[0].content.version, 2);
    assert_eq!(data.frameworks[0].content.content, "body");
    assert_eq!(data.prompts[0].content.version, 2);
    // shared 欠落時は既定値
    assert!(data.prompts[0].shared);
}

#[test]
fn unknown_keys_survive_round_trip() {
    let data: AppData = serde_json::from_value(stored_json()).unwrap();
    assert_eq!(data.extra["providers"], json!([{"name": "openai"}]));
    assert_eq!(data.settings.extra["theme"], json!("dark"));

    let saved = serde_json::to_value(&data).unwrap();
    assert_eq!(saved["providers"], json!([{"name": "openai"}]));
    assert_eq!(saved["settings"]["theme"], json!("dark"));
    assert_eq!(saved["prompts"][0]["shared"], json!(true));
}

#[test]
fn invalid_stored_document_is_an_error() {
    let mut stored = stored_json();
    stored["prompts"][0]["content"]["template"] = json!("");
    assert!(serde_json::from_value::<AppData>(stored).is_err());
}

#[test]
fn initial_data_has_default_framework() {
    let data = AppData::initial();
    assert_eq!(data.frameworks.len(), 1);
    assert!(data.prompts.is_empty());

    let fw = data.default_framework().unwrap();
    assert_eq!(fw.id, data.settings.default_framework_id);
    assert_eq!(fw.content.name, INITIAL_FRAMEWORK_NAME);
    assert_eq!(fw.content.content, "");
    assert_eq!(fw.order, 1);
    fw.content.check().unwrap();
}

#[test]
fn default_framework_falls_back_to_first() {
    let mut data: AppData = serde_json::from_value(stored_json()).unwrap();
    data.settings.default_framework_id = "missing".to_string();
    assert_eq!(data.default_framework().unwrap().id, FW_ID);
}

#[test]
fn max_order_and_ordering() {
    let mut data = AppData::default();
    assert_eq!(data.max_prompt_order(), 0);

    let ts = now_timestamp();
    let ids = [
        "33333333-3333-4333-8333-333333333333",
        "44444444-4444-4444-8444-444444444444",
    ];
    data.prompts.push(PromptEntry::new(PromptDsl::new(ids[0], "a"), 7, true, &ts));
    data.prompts.push(PromptEntry::new(PromptDsl::new(ids[1], "b"), 2, false, &ts));

    assert_eq!(data.max_prompt_order(), 7);
    let ordered: Vec<&str> = data.prompts_by_order().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ordered, [ids[1], ids[0]]);
    assert!(data.contains_prompt(ids[0]));
    assert!(!data.contains_prompt(PROMPT_ID));
}

#[test]
fn clear_selection_empties_known_fields() {
    let mut snapshot: SnapshotData = serde_json::from_value(json!({
        "promptPlayground": {"selectedPromptId": "p1", "userPrompt": "keep"},
        "promptImprovement": {"selectedPromptId": "p2"},
        "editPrompt": {"id": "p3", "name": "keep"},
        "other": {"selectedPromptId": "untouched"}
    }))
    .unwrap();

    assert!(snapshot.clear_selection());
    assert_eq!(snapshot.selected("promptPlayground", "selectedPromptId"), Some(""));
    assert_eq!(snapshot.selected("promptImprovement", "selectedPromptId"), Some(""));
    assert_eq!(snapshot.selected("editPrompt", "id"), Some(""));
    assert_eq!(snapshot.selected("promptPlayground", "userPrompt"), Some("keep"));
    assert_eq!(snapshot.selected("other", "selectedPromptId"), Some("untouched"));

    // 2 回目は変更なし
    assert!(!snapshot.clear_selection());
}

#[test]
fn timestamps_are_rfc3339_utc() {
    let ts = now_timestamp();
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
}

#[test]
fn upsert_prompt_appends_new_and_updates_existing() {
    use super::fixtures::*;
    let mut data = app_data(
        vec![framework_entry(FW_ID, "fw", "", 1)],
        vec![prompt_entry(&uuid(1), "one", 4, false)],
    );

    let later = "2025-06-01T00:00:00.000Z";
    assert!(data.upsert_prompt(PromptDsl::new(uuid(2), "two"), later));
    let added = data.find_prompt(&uuid(2)).unwrap();
    assert_eq!(added.order, 5);
    assert!(added.shared);
    assert_eq!(added.created_at, later);

    assert!(!data.upsert_prompt(PromptDsl::new(uuid(1), "one, edited"), later));
    let edited = data.find_prompt(&uuid(1)).unwrap();
    assert_eq!(edited.content.template, "one, edited");
    assert_eq!(edited.order, 4);
    assert!(!edited.shared);
    assert_eq!(edited.created_at, TIMESTAMP);
    assert_eq!(edited.updated_at, later);
    assert_eq!(data.prompts.len(), 2);
}

#[test]
fn upsert_framework_keeps_order_on_update() {
    use super::fixtures::*;
    let mut data = app_data(vec![framework_entry(FW_ID, "fw", "old", 3)], vec![]);
    let later = "2025-06-01T00:00:00.000Z";

    let mut doc = FrameworkDsl::new(FW_ID, "fw");
    doc.content = "new".to_string();
    assert!(!data.upsert_framework(doc, later));
    assert_eq!(data.frameworks.len(), 1);
    assert_eq!(data.frameworks[0].content.content, "new");
    assert_eq!(data.frameworks[0].order, 3);
    assert_eq!(data.frameworks[0].updated_at, later);

    assert!(data.upsert_framework(FrameworkDsl::new(uuid(9), "second"), later));
    assert_eq!(data.frameworks[1].order, 4);
    // 既定 Framework は変わらない
    assert_eq!(data.settings.default_framework_id, FW_ID);
}

#[test]
fn remove_prompt_returns_removed_entry() {
    use super::fixtures::*;
    let mut data = app_data(
        vec![],
        vec![prompt_entry(&uuid(1), "a", 1, true), prompt_entry(&uuid(2), "b", 2, true)],
    );

    let removed = data.remove_prompt(&uuid(1)).unwrap();
    assert_eq!(removed.content.template, "a");
    assert!(!data.contains_prompt(&uuid(1)));
    assert!(data.contains_prompt(&uuid(2)));
    assert!(data.remove_prompt(&uuid(1)).is_none());
}
