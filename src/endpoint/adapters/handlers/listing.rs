//! Numbered result listings with a uniform empty case.

/// Maximum number of entries shown for one search.
pub const RESULT_LIMIT: usize = 5;

/// A rendered search listing.
///
/// An empty listing renders its guidance text. Zero matches is an ordinary
/// answer, so callers always return it as a success.
pub(super) struct ResultListing {
    entries: Vec<String>,
    total: usize,
}

impl ResultListing {
    /// Formats at most [`RESULT_LIMIT`] items.
    ///
    /// `total` is the backend's own match count when it reports one; it is
    /// raised to the number of received items otherwise.
    pub fn new<T>(items: &[T], total: usize, format_item: impl Fn(&T) -> String) -> Self {
        let entries = items.iter().take(RESULT_LIMIT).map(format_item).collect();
        Self {
            entries,
            total: total.max(items.len()),
        }
    }

    /// Returns how many entries will be shown.
    pub fn shown(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total number of matches.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Renders the listing, or `no_results` when it is empty.
    pub fn render(&self, heading: &str, no_results: &str) -> String {
        if self.entries.is_empty() {
            return no_results.to_owned();
        }

        let mut output = String::from(heading);
        for (index, entry) in self.entries.iter().enumerate() {
            output.push_str(&format!("\n\n{}. {entry}", index + 1));
        }
        if self.total > self.entries.len() {
            output.push_str(&format!(
                "\n\n_Showing top {} of {} results._",
                self.entries.len(),
                self.total
            ));
        }
        output
    }
}
