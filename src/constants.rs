//! Cross-cutting, shared constants.
//!
//! Column names of the feedback file live here because the store, the bulk importer and
//! the annotator all need to agree on them.

/// Header of the `name` column in feedback files.
pub const NAME_COLUMN: &str = "name";
/// Header of the `ethnicity` column in feedback files.
pub const ETHNICITY_COLUMN: &str = "ethnicity";
/// Header of the `notes` column in feedback files.
pub const NOTES_COLUMN: &str = "notes";

/// Header row written on every persist, in order.
pub const FEEDBACK_HEADER: [&str; 3] = [NAME_COLUMN, ETHNICITY_COLUMN, NOTES_COLUMN];

/// Header inserted into annotated output files.
pub const OUTPUT_LABEL_HEADER: &str = "Ethnicity";

/// Column index at which the label is inserted in annotated rows.
pub const OUTPUT_LABEL_POSITION: usize = 1;

/// Label used for rows whose name column is blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const DEFAULT_FEWSHOT_COUNT: usize = 5;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_CA_BUNDLE: &str = "/etc/ssl/cert.pem";

pub const DEFAULT_FEEDBACK_STORE: &str = "feedback.csv";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 2_000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// HTTP statuses that are worth another attempt.
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Suffix appended to the input stem when no output path is given.
pub const OUTPUT_SUFFIX: &str = "_with_ethnicity";
