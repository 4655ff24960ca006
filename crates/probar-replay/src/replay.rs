//! ReplayDriver - scripted WebDriver test double
//!
//! Every [`WebDriver`] method funnels into [`ReplayDriver::call`]:
//!
//! ```text
//! call(op, args, sink?)
//!   │
//!   ├─► match_call   pop next expectation, check name + args
//!   ├─► resolve      write content → raise failure → return value(s)
//!   └─► Outcome / DriverError
//! ```
//!
//! # Example
//!
//! ```
//! use probar_replay::{Expectation, ReplayDriver, WebDriver};
//! use serde_json::json;
//!
//! let mut driver = ReplayDriver::new(vec![
//!     Expectation::new("navigate").with_args(vec![json!("http://x")]),
//!     Expectation::new("find_element")
//!         .with_args(vec![json!("//div")])
//!         .returning(json!({"id": "abc"})),
//! ]);
//!
//! driver.start();
//! driver.navigate("http://x").unwrap();
//! let div = driver.find_element("//div").unwrap();
//! assert_eq!(div.id, "abc");
//! driver.stop();
//! assert!(driver.diagnostics().is_empty());
//! ```

use crate::config::ReplayConfig;
use crate::diagnostic::Diagnostic;
use crate::driver::{ElementHandle, Operation, WebDriver};
use crate::expectation::Expectation;
use crate::matcher::match_call;
use crate::queue::ExpectationQueue;
use crate::resolver::{resolve, Outcome};
use crate::result::{ConfigResult, DriverError, DriverResult};
use crate::script::ExpectationScript;
use crate::wait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// A call that matched its expectation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    /// Operation name
    pub operation: String,
    /// Arguments as passed (sink excluded)
    pub args: Vec<Value>,
}

/// Scripted driver that verifies call order and arguments.
///
/// Owns its queue exclusively. Calls take `&mut self`, so the pop-and-compare
/// step can never interleave with another call on the same session.
#[derive(Debug, Default)]
pub struct ReplayDriver {
    script: ExpectationScript,
    config: ReplayConfig,
    queue: ExpectationQueue,
    started: bool,
    diagnostics: Vec<Diagnostic>,
    history: Vec<CallRecord>,
}

impl ReplayDriver {
    /// Create a driver for `script` with default configuration
    #[must_use]
    pub fn new(script: impl Into<ExpectationScript>) -> Self {
        Self::with_config(script, ReplayConfig::default())
    }

    /// Create a driver with explicit configuration
    #[must_use]
    pub fn with_config(script: impl Into<ExpectationScript>, config: ReplayConfig) -> Self {
        Self {
            script: script.into(),
            config,
            ..Self::default()
        }
    }

    /// Load the script from a YAML/JSON file
    pub fn from_file(path: impl AsRef<Path>, config: ReplayConfig) -> ConfigResult<Self> {
        Ok(Self::with_config(ExpectationScript::load(path)?, config))
    }

    /// Begin a session: the queue is refilled from the script
    pub fn start(&mut self) {
        self.queue.reset(self.script.expectations());
        self.history.clear();
        self.started = true;
        tracing::info!(
            script = self.script.name(),
            expectations = self.queue.remaining_count(),
            "replay session started"
        );
    }

    /// End the session.
    ///
    /// Leftover expectations produce a warning diagnostic, never an error.
    /// The queue is left as-is for inspection until the next `start()`.
    pub fn stop(&mut self) {
        if let Some(next) = self.queue.peek() {
            let diagnostic = Diagnostic::unconsumed(self.queue.remaining_count(), next.operation());
            tracing::warn!(script = self.script.name(), "{diagnostic}");
            self.diagnostics.push(diagnostic);
        }
        self.started = false;
        tracing::info!(
            script = self.script.name(),
            calls = self.history.len(),
            "replay session stopped"
        );
    }

    /// Single chokepoint for every operation.
    ///
    /// `args` excludes the sink; `sink` is only passed by operations that
    /// write output.
    pub fn call(
        &mut self,
        operation: &str,
        args: Vec<Value>,
        sink: Option<&mut dyn Write>,
    ) -> DriverResult<Outcome> {
        if self.config.strict_session && !self.started {
            return Err(DriverError::SessionNotStarted {
                operation: operation.to_string(),
            });
        }

        let expectation = match_call(&mut self.queue, operation, &args)?;
        self.history.push(CallRecord {
            operation: operation.to_string(),
            args,
        });
        resolve(&expectation, sink)
    }

    /// Poll `predicate` with the configured delay and timeout
    pub fn wait_for<T, F>(&mut self, mut predicate: F) -> DriverResult<Option<T>>
    where
        F: FnMut(&mut Self) -> DriverResult<Option<T>>,
    {
        let poll_delay = self.config.poll_delay;
        let retry_timeout = self.config.retry_timeout;
        wait::wait_for(|| predicate(self), poll_delay, retry_timeout)
    }

    /// Whether `start()` was called without a later `stop()`
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Script this driver replays
    #[must_use]
    pub const fn script(&self) -> &ExpectationScript {
        &self.script
    }

    /// Number of expectations not yet consumed
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.queue.remaining_count()
    }

    /// Expectations not yet consumed, in call order
    pub fn remaining(&self) -> impl Iterator<Item = &Expectation> {
        self.queue.remaining()
    }

    /// Diagnostics emitted so far
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the diagnostics channel
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Calls matched in this session
    #[must_use]
    pub fn history(&self) -> &[CallRecord] {
        &self.history
    }

    /// Check if operation was called in this session
    #[must_use]
    pub fn was_called(&self, operation: &str) -> bool {
        self.history.iter().any(|c| c.operation == operation)
    }

    fn call_unit(&mut self, op: Operation, args: Vec<Value>) -> DriverResult<()> {
        self.call(op.as_str(), args, None).map(drop)
    }

    fn call_typed<T: DeserializeOwned>(&mut self, op: Operation, args: Vec<Value>) -> DriverResult<T> {
        self.call(op.as_str(), args, None)?.into_typed(op.as_str())
    }

    fn call_sink(&mut self, op: Operation, sink: &mut dyn Write) -> DriverResult<()> {
        self.call(op.as_str(), Vec::new(), Some(sink)).map(drop)
    }
}

impl WebDriver for ReplayDriver {
    fn navigate(&mut self, url: &str) -> DriverResult<()> {
        self.call_unit(Operation::Navigate, vec![json!(url)])
    }

    fn find_element(&mut self, selector: &str) -> DriverResult<ElementHandle> {
        self.call_typed(Operation::FindElement, vec![json!(selector)])
    }

    fn find_elements(&mut self, selector: &str) -> DriverResult<Vec<ElementHandle>> {
        let op = Operation::FindElements;
        let items = self.call(op.as_str(), vec![json!(selector)], None)?.into_sequence();
        Outcome::Sequence(items).into_typed(op.as_str())
    }

    fn click(&mut self, element: &ElementHandle) -> DriverResult<()> {
        self.call_unit(Operation::Click, vec![element.as_arg()])
    }

    fn double_click(&mut self, element: &ElementHandle) -> DriverResult<()> {
        self.call_unit(Operation::DoubleClick, vec![element.as_arg()])
    }

    fn execute_script(&mut self, script: &str, args: &[Value]) -> DriverResult<Value> {
        let mut call_args = Vec::with_capacity(args.len() + 1);
        call_args.push(json!(script));
        call_args.extend_from_slice(args);
        self.call_typed(Operation::ExecuteScript, call_args)
    }

    fn get_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
    ) -> DriverResult<Option<String>> {
        self.call_typed(Operation::GetAttribute, vec![element.as_arg(), json!(name)])
    }

    fn set_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
        value: &str,
    ) -> DriverResult<()> {
        self.call_unit(
            Operation::SetAttribute,
            vec![element.as_arg(), json!(name), json!(value)],
        )
    }

    fn text(&mut self, element: &ElementHandle) -> DriverResult<String> {
        self.call_typed(Operation::Text, vec![element.as_arg()])
    }

    fn is_selected(&mut self, element: &ElementHandle) -> DriverResult<bool> {
        self.call_typed(Operation::IsSelected, vec![element.as_arg()])
    }

    fn set_selected(&mut self, element: &ElementHandle, selected: bool) -> DriverResult<()> {
        self.call_unit(Operation::SetSelected, vec![element.as_arg(), json!(selected)])
    }

    fn send_keys(&mut self, element: &ElementHandle, keys: &str) -> DriverResult<()> {
        self.call_unit(Operation::SendKeys, vec![element.as_arg(), json!(keys)])
    }

    fn tag_name(&mut self, element: &ElementHandle) -> DriverResult<String> {
        self.call_typed(Operation::TagName, vec![element.as_arg()])
    }

    fn page_source(&mut self, sink: &mut dyn Write) -> DriverResult<()> {
        self.call_sink(Operation::PageSource, sink)
    }

    fn screenshot(&mut self, sink: &mut dyn Write) -> DriverResult<()> {
        self.call_sink(Operation::Screenshot, sink)
    }

    fn set_wait_timeout(&mut self, timeout: Duration) -> DriverResult<()> {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.call_unit(Operation::SetWaitTimeout, vec![json!(millis)])
    }

    fn set_window_size(&mut self, width: u32, height: u32) -> DriverResult<()> {
        self.call_unit(Operation::SetWindowSize, vec![json!(width), json!(height)])
    }
}
