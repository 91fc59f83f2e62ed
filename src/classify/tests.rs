use super::*;
use crate::cache::FeedbackStore;
use tempfile::TempDir;

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

fn seeded_store(dir: &TempDir) -> FeedbackStore {
    let mut store = FeedbackStore::load(dir.path().join("feedback.csv")).expect("load");
    store
        .append("Rahul Sharma", "Indian", "verified by ops")
        .expect("append");
    store.append("Raul Gomez", "Latino", "").expect("append");
    store.append("Li Wei", "East Asian", "").expect("append");
    store
}

#[tokio::test]
async fn test_header_gets_label_column() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::default();

    let annotated = annotate_rows(
        vec![row(&["name", "email"]), row(&["Li Wei", "li@example.com"])],
        &store,
        &provider,
        &AnnotateOptions::default(),
    )
    .await
    .expect("annotate");

    assert_eq!(annotated.rows[0], row(&["name", "Ethnicity", "email"]));
    assert_eq!(annotated.rows[1], row(&["Li Wei", "East Asian", "li@example.com"]));
}

#[tokio::test]
async fn test_cached_names_skip_the_model() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::new("European");

    let annotated = annotate_rows(
        vec![
            row(&["name"]),
            row(&["  RAHUL SHARMA "]),
            row(&["Mia Jensen"]),
        ],
        &store,
        &provider,
        &AnnotateOptions::default(),
    )
    .await
    .expect("annotate");

    assert_eq!(annotated.rows[1], row(&["  RAHUL SHARMA ", "Indian"]));
    assert_eq!(annotated.rows[2], row(&["Mia Jensen", "European"]));
    assert_eq!(provider.called_names(), vec!["Mia Jensen".to_string()]);
    assert_eq!(
        annotated.summary,
        AnnotationSummary {
            cached: 1,
            model: 1,
            blank: 0,
            skipped: 0
        }
    );
}

#[tokio::test]
async fn test_force_api_ignores_cache() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::new("South Asian");
    let options = AnnotateOptions {
        force_api: true,
        ..Default::default()
    };

    let annotated = annotate_rows(
        vec![row(&["name"]), row(&["Rahul Sharma"])],
        &store,
        &provider,
        &options,
    )
    .await
    .expect("annotate");

    assert_eq!(annotated.rows[1][1], "South Asian");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_blank_names_are_unknown_without_a_call() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::default();
    let options = AnnotateOptions {
        has_header: false,
        ..Default::default()
    };

    let annotated = annotate_rows(vec![row(&["   ", "x"]), Vec::new()], &store, &provider, &options)
        .await
        .expect("annotate");

    assert_eq!(annotated.rows[0], row(&["   ", "Unknown", "x"]));
    assert_eq!(annotated.rows[1], row(&["Unknown"]));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(annotated.summary.blank, 2);
}

#[tokio::test]
async fn test_limit_leaves_remaining_rows_blank() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::new("Mixed");
    let options = AnnotateOptions {
        limit: Some(2),
        ..Default::default()
    };

    let annotated = annotate_rows(
        vec![
            row(&["name"]),
            row(&["Li Wei"]),
            row(&[""]),
            row(&["Noah Clarke"]),
            row(&["Rahul Sharma"]),
        ],
        &store,
        &provider,
        &options,
    )
    .await
    .expect("annotate");

    assert_eq!(annotated.rows[1][1], "East Asian");
    assert_eq!(annotated.rows[2][1], "Unknown");
    assert_eq!(annotated.rows[3], row(&["Noah Clarke", ""]));
    assert_eq!(annotated.rows[4], row(&["Rahul Sharma", ""]));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(annotated.summary.processed(), 2);
    assert_eq!(annotated.summary.skipped, 2);
}

#[tokio::test]
async fn test_prompt_carries_similar_examples() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::new("Indian");
    let options = AnnotateOptions {
        prompt: "Base.".to_string(),
        fewshot_count: 2,
        ..Default::default()
    };

    annotate_rows(vec![row(&["name"]), row(&["Rahul"])], &store, &provider, &options)
        .await
        .expect("annotate");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].system_prompt,
        "Base.\n\nPreviously approved mappings:\n- Rahul Sharma -> Indian (verified by ops)\n- Raul Gomez -> Latino"
    );
}

#[tokio::test]
async fn test_prompt_falls_back_to_sample_when_nothing_is_similar() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::default();
    let options = AnnotateOptions {
        prompt: "Base.".to_string(),
        fewshot_count: 1,
        has_header: false,
        ..Default::default()
    };

    annotate_rows(vec![row(&["Zzzzz"])], &store, &provider, &options)
        .await
        .expect("annotate");

    assert_eq!(
        provider.calls()[0].system_prompt,
        "Base.\n\nPreviously approved mappings:\n- Rahul Sharma -> Indian (verified by ops)"
    );
}

#[tokio::test]
async fn test_empty_store_uses_bare_prompt() {
    let dir = TempDir::new().expect("temp dir");
    let store = FeedbackStore::load(dir.path().join("absent.csv")).expect("load");
    let provider = MockLabelProvider::default();
    let options = AnnotateOptions {
        has_header: false,
        ..Default::default()
    };

    annotate_rows(vec![row(&["Ana"])], &store, &provider, &options)
        .await
        .expect("annotate");

    assert_eq!(provider.calls()[0].system_prompt, DEFAULT_PROMPT);
}

#[tokio::test]
async fn test_provider_error_stops_annotation() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::failing(400);

    let err = annotate_rows(
        vec![row(&["name"]), row(&["Unseen Name"]), row(&["Another"])],
        &store,
        &provider,
        &AnnotateOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClassifyError::Http { status: 400, .. }));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_empty_input_yields_empty_output() {
    let dir = TempDir::new().expect("temp dir");
    let store = seeded_store(&dir);
    let provider = MockLabelProvider::default();

    let annotated = annotate_rows(Vec::new(), &store, &provider, &AnnotateOptions::default())
        .await
        .expect("annotate");

    assert!(annotated.rows.is_empty());
    assert_eq!(annotated.summary, AnnotationSummary::default());
}

#[tokio::test]
async fn test_mock_per_name_labels() {
    let provider = MockLabelProvider::new("Unknown").with_label("Ana", "Latino");

    assert_eq!(provider.classify("Ana", "p").await.expect("label"), "Latino");
    assert_eq!(provider.classify("Bo", "p").await.expect("label"), "Unknown");
}
