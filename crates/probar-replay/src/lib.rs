//! Probar Replay: scripted WebDriver test double
//!
//! A [`ReplayDriver`] is built from an ordered list of [`Expectation`]s. Each
//! driver call consumes the next expectation, checks the operation name and
//! arguments, and hands back the canned outcome: a return value, a sequence,
//! bytes written into an output sink, or a scripted failure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    REPLAY Architecture                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Code under │    │ Replay     │    │ Expectation│            │
//! │   │ test       │───►│ Driver     │◄───│ Queue      │            │
//! │   │ (WebDriver)│    │ (matcher)  │    │ (script)   │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           ▼                                      │
//! │          return value │ sequence │ sink bytes │ failure          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use probar_replay::{ExpectationScript, ReplayDriver, WebDriver};
//!
//! let script = ExpectationScript::from_yaml(r##"
//! - operation: navigate
//!   expectedArgs: ["http://localhost/"]
//! - operation: find_element
//!   expectedArgs: ["#user"]
//!   returnValue: { id: "user", tagName: "input" }
//! - operation: page_source
//!   content: "<html></html>"
//! "##).unwrap();
//!
//! let mut driver = ReplayDriver::new(script);
//! driver.start();
//! driver.navigate("http://localhost/").unwrap();
//! let user = driver.find_element("#user").unwrap();
//! assert_eq!(user.tag_name.as_deref(), Some("input"));
//! let mut html: Vec<u8> = Vec::new();
//! driver.page_source(&mut html).unwrap();
//! assert_eq!(html, b"<html></html>");
//! driver.stop();
//! ```

#![warn(missing_docs)]

#[cfg(feature = "async")]
mod async_driver;
mod config;
mod content;
mod diagnostic;
mod driver;
mod expectation;
mod matcher;
mod queue;
mod replay;
mod resolver;
mod result;
mod script;
mod value;

/// Wait Mechanisms
///
/// Poll a predicate with a fixed delay until it yields or times out.
pub mod wait;

#[cfg(feature = "async")]
pub use async_driver::AsyncWebDriver;
pub use config::{ReplayConfig, ENV_POLL_MS, ENV_STRICT, ENV_TIMEOUT_MS};
pub use content::inject;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use driver::{first_element, ElementHandle, Operation, UnknownOperation, WebDriver};
pub use expectation::{ContentSpec, Expectation, ExpectationRecord, ReturnSpec};
pub use matcher::match_call;
pub use queue::ExpectationQueue;
pub use replay::{CallRecord, ReplayDriver};
pub use resolver::{resolve, Outcome};
pub use result::{ConfigError, ConfigResult, DriverError, DriverResult, ErrorKind};
pub use script::{ExpectationScript, LintFinding, ScriptFile};
pub use value::{args_equal, values_equal};
pub use wait::{wait_for, wait_until, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "async")]
    pub use super::async_driver::*;
    pub use super::driver::*;
    pub use super::expectation::{ContentSpec, Expectation, ReturnSpec};
    pub use super::replay::*;
    pub use super::resolver::Outcome;
    pub use super::result::*;
    pub use super::script::ExpectationScript;
    pub use super::ReplayConfig;
}
