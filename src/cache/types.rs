/// Where a row's label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSource {
    /// Reused from the feedback store.
    Cached,
    /// Returned by the model.
    Model,
    /// Name column was blank; labelled without a lookup.
    BlankName,
    /// Past the row limit; left unlabelled.
    Skipped,
}

impl LabelSource {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSource::Cached => "CACHED",
            LabelSource::Model => "MODEL",
            LabelSource::BlankName => "BLANK_NAME",
            LabelSource::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for LabelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
