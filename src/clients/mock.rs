//! # Mock Collaborators
//!
//! In-memory [`TextProvider`] and [`SheetStore`] implementations for tests.
//!
//! [`MockProvider`] answers completions from a list of rules set up with a
//! fluent builder; [`MockSheetStore`] keeps ranges in a map and records writes.
//!
//! ```ignore
//! let provider = MockProvider::new();
//! provider.on_kind(ContentKind::AdCopy).return_err(ClientError::with_status(500, "down"));
//! provider.on_any().return_ok("Generated copy");
//!
//! let service = ContentService::new(Arc::new(provider.clone()), settings);
//! // ...
//! provider.verify(); // every rule matched at least once
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::{ClientError, CompletionRequest, SheetStore, TextProvider};
use crate::model::ContentKind;
use crate::prompts;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// TEXT PROVIDER
// =============================================================================

#[derive(Debug, Clone)]
enum Matcher {
    Kind(ContentKind),
    Any,
}

impl Matcher {
    fn matches(&self, request: &CompletionRequest) -> bool {
        match self {
            Matcher::Kind(kind) => request.user_prompt.starts_with(prompts::heading(*kind)),
            Matcher::Any => true,
        }
    }
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    response: Result<String, ClientError>,
    delay: Option<Duration>,
    hits: usize,
}

/// A scripted text provider.
///
/// Rules are checked in the order they were added; the first match answers.
/// A request that matches no rule fails with a status-less [`ClientError`].
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that answers every request with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        let provider = Self::new();
        provider.on_any().return_ok(text);
        provider
    }

    /// Expects requests whose prompt was built for `kind`.
    pub fn on_kind(&self, kind: ContentKind) -> RuleBuilder {
        RuleBuilder::new(Matcher::Kind(kind), self.rules.clone())
    }

    /// Expects any request.
    pub fn on_any(&self) -> RuleBuilder {
        RuleBuilder::new(Matcher::Any, self.rules.clone())
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of requests whose prompt was built for `kind`.
    pub fn calls_for(&self, kind: ContentKind) -> usize {
        let matcher = Matcher::Kind(kind);
        lock(&self.calls)
            .iter()
            .filter(|request| matcher.matches(request))
            .count()
    }

    /// Panics if any rule was never matched.
    pub fn verify(&self) {
        let rules = lock(&self.rules);
        let unmet: Vec<_> = rules
            .iter()
            .filter(|rule| rule.hits == 0)
            .map(|rule| format!("{:?}", rule.matcher))
            .collect();
        if !unmet.is_empty() {
            panic!("Not all expectations were met: {}", unmet.join(", "));
        }
    }
}

/// Builder for one [`MockProvider`] rule.
pub struct RuleBuilder {
    matcher: Matcher,
    delay: Option<Duration>,
    rules: Arc<Mutex<Vec<Rule>>>,
}

impl RuleBuilder {
    fn new(matcher: Matcher, rules: Arc<Mutex<Vec<Rule>>>) -> Self {
        Self {
            matcher,
            delay: None,
            rules,
        }
    }

    /// Delays the response, to shuffle completion order of concurrent calls.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the rule to return generated text.
    pub fn return_ok(self, text: impl Into<String>) {
        self.push(Ok(text.into()));
    }

    /// Sets the rule to return an error.
    pub fn return_err(self, error: ClientError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<String, ClientError>) {
        lock(&self.rules).push(Rule {
            matcher: self.matcher,
            response,
            delay: self.delay,
            hits: 0,
        });
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ClientError> {
        let answer = {
            let mut rules = lock(&self.rules);
            rules
                .iter_mut()
                .find(|rule| rule.matcher.matches(&request))
                .map(|rule| {
                    rule.hits += 1;
                    (rule.response.clone(), rule.delay)
                })
        };
        lock(&self.calls).push(request);

        match answer {
            Some((response, delay)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Err(ClientError::new("Unexpected completion request")),
        }
    }
}

// =============================================================================
// SHEET STORE
// =============================================================================

#[derive(Debug, Default)]
struct SheetState {
    ranges: HashMap<(String, String), Vec<Vec<String>>>,
    read_error: Option<ClientError>,
    write_error: Option<ClientError>,
    reads: usize,
    writes: usize,
}

/// An in-memory spreadsheet keyed by `(sheet_id, range)`.
///
/// Reading a range that was never set yields no rows. Writes replace the
/// stored range, so a later read sees them.
#[derive(Debug, Clone, Default)]
pub struct MockSheetStore {
    state: Arc<Mutex<SheetState>>,
}

impl MockSheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a range with rows given as string slices.
    pub fn with_rows(self, sheet_id: &str, range: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        lock(&self.state)
            .ranges
            .insert((sheet_id.to_string(), range.to_string()), rows);
        self
    }

    pub fn fail_reads(&self, error: ClientError) {
        lock(&self.state).read_error = Some(error);
    }

    pub fn fail_writes(&self, error: ClientError) {
        lock(&self.state).write_error = Some(error);
    }

    /// Current contents of a range.
    pub fn rows(&self, sheet_id: &str, range: &str) -> Option<Vec<Vec<String>>> {
        lock(&self.state)
            .ranges
            .get(&(sheet_id.to_string(), range.to_string()))
            .cloned()
    }

    pub fn read_count(&self) -> usize {
        lock(&self.state).reads
    }

    pub fn write_count(&self) -> usize {
        lock(&self.state).writes
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn get_values(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ClientError> {
        let mut state = lock(&self.state);
        state.reads += 1;
        if let Some(error) = &state.read_error {
            return Err(error.clone());
        }
        Ok(state
            .ranges
            .get(&(sheet_id.to_string(), range.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn update_values(
        &self,
        sheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), ClientError> {
        let mut state = lock(&self.state);
        state.writes += 1;
        if let Some(error) = &state.write_error {
            return Err(error.clone());
        }
        state
            .ranges
            .insert((sheet_id.to_string(), range.to_string()), rows);
        Ok(())
    }
}
