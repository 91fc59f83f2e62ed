//! Row annotation: cache lookup first, model call on a miss.

use tracing::{debug, info, instrument};

use super::error::ClassifyResult;
use super::prompt::{DEFAULT_PROMPT, build_prompt};
use super::provider::LabelProvider;
use super::rows::{Row, insert_label, row_name};
use crate::cache::{FeedbackStore, LabelSource};
use crate::constants::{DEFAULT_FEWSHOT_COUNT, OUTPUT_LABEL_HEADER, UNKNOWN_LABEL};

#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Base system prompt; few-shot examples are appended per row.
    pub prompt: String,
    /// Label at most this many data rows; the rest get an empty label.
    pub limit: Option<usize>,
    /// Treat the first row as a header.
    pub has_header: bool,
    pub fewshot_count: usize,
    /// Call the model even when the store already has a label.
    pub force_api: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            limit: None,
            has_header: true,
            fewshot_count: DEFAULT_FEWSHOT_COUNT,
            force_api: false,
        }
    }
}

/// Per-source row counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub cached: usize,
    pub model: usize,
    pub blank: usize,
    pub skipped: usize,
}

impl AnnotationSummary {
    fn record(&mut self, source: LabelSource) {
        match source {
            LabelSource::Cached => self.cached += 1,
            LabelSource::Model => self.model += 1,
            LabelSource::BlankName => self.blank += 1,
            LabelSource::Skipped => self.skipped += 1,
        }
    }

    /// Rows that counted towards the limit.
    pub fn processed(&self) -> usize {
        self.cached + self.model + self.blank
    }
}

#[derive(Debug)]
pub struct Annotated {
    pub rows: Vec<Row>,
    pub summary: AnnotationSummary,
}

/// Labels every data row of `rows` and returns them with the label inserted at column 1.
///
/// Stops at the first provider error; rows already labelled are discarded with it.
#[instrument(skip_all, fields(rows = rows.len(), force_api = options.force_api))]
pub async fn annotate_rows<P>(
    rows: Vec<Row>,
    store: &FeedbackStore,
    provider: &P,
    options: &AnnotateOptions,
) -> ClassifyResult<Annotated>
where
    P: LabelProvider + ?Sized,
{
    let mut output = Vec::with_capacity(rows.len());
    let mut summary = AnnotationSummary::default();
    let mut rows = rows.into_iter();

    if options.has_header
        && let Some(mut header) = rows.next()
    {
        insert_label(&mut header, OUTPUT_LABEL_HEADER);
        output.push(header);
    }

    for (row_number, mut row) in rows.enumerate() {
        let within_limit = options
            .limit
            .is_none_or(|limit| summary.processed() < limit);

        let (label, source) = if within_limit {
            label_for(row_name(&row), store, provider, options).await?
        } else {
            (String::new(), LabelSource::Skipped)
        };

        debug!(row = row_number, name = row_name(&row), source = %source, "Labelled row");
        insert_label(&mut row, label);
        output.push(row);
        summary.record(source);
    }

    info!(
        cached = summary.cached,
        model = summary.model,
        blank = summary.blank,
        skipped = summary.skipped,
        "Annotation complete"
    );

    Ok(Annotated {
        rows: output,
        summary,
    })
}

async fn label_for<P>(
    name: &str,
    store: &FeedbackStore,
    provider: &P,
    options: &AnnotateOptions,
) -> ClassifyResult<(String, LabelSource)>
where
    P: LabelProvider + ?Sized,
{
    if name.is_empty() {
        return Ok((UNKNOWN_LABEL.to_string(), LabelSource::BlankName));
    }

    if !options.force_api
        && let Some(entry) = store.lookup(name)
    {
        debug!(name, ethnicity = %entry.ethnicity, "Feedback cache hit");
        return Ok((entry.ethnicity.clone(), LabelSource::Cached));
    }

    let examples = store.examples_for(name, options.fewshot_count);
    let prompt = build_prompt(&options.prompt, &examples);
    debug!(name, examples = examples.len(), "Asking model");

    let label = provider.classify(name, &prompt).await?;
    Ok((label, LabelSource::Model))
}
