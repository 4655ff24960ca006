//! Expectation records: one scripted driver call and its canned outcome.

use crate::result::ConfigError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Canned content written into a caller-supplied sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSpec {
    /// Text written as-is
    Literal(String),
    /// Base64 text, decoded before writing
    Base64(String),
    /// File whose bytes are copied verbatim
    File(PathBuf),
}

impl ContentSpec {
    /// Short name of the source kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Base64(_) => "base64",
            Self::File(_) => "file",
        }
    }
}

/// Value(s) handed back on a successful match
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnSpec {
    /// A single value
    Value(Value),
    /// A sequence of values
    Sequence(Vec<Value>),
}

/// One anticipated interaction.
///
/// Built with the consuming builder methods and immutable afterwards.
///
/// # Example
///
/// ```
/// use probar_replay::Expectation;
/// use serde_json::json;
///
/// let exp = Expectation::new("find_element")
///     .with_args(vec![json!("//div")])
///     .returning(json!({"id": "abc"}));
/// assert_eq!(exp.operation(), "find_element");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    operation: String,
    expected_args: Option<Vec<Value>>,
    returns: Option<ReturnSpec>,
    failure: Option<Value>,
    content: Option<ContentSpec>,
}

impl Expectation {
    /// Expect a call to `operation` with unchecked arguments
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            expected_args: None,
            returns: None,
            failure: None,
            content: None,
        }
    }

    /// Require the call's arguments to equal `args`
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.expected_args = Some(args);
        self
    }

    /// Return a single value
    #[must_use]
    pub fn returning(mut self, value: Value) -> Self {
        self.returns = Some(ReturnSpec::Value(value));
        self
    }

    /// Return a sequence of values
    #[must_use]
    pub fn returning_sequence(mut self, values: Vec<Value>) -> Self {
        self.returns = Some(ReturnSpec::Sequence(values));
        self
    }

    /// Fail the call with `failure`
    #[must_use]
    pub fn failing(mut self, failure: impl Into<Value>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    /// Write literal text into the sink
    #[must_use]
    pub fn with_content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(ContentSpec::Literal(text.into()));
        self
    }

    /// Write base64-decoded bytes into the sink
    #[must_use]
    pub fn with_content_base64(mut self, encoded: impl Into<String>) -> Self {
        self.content = Some(ContentSpec::Base64(encoded.into()));
        self
    }

    /// Copy a file's bytes into the sink
    #[must_use]
    pub fn with_content_from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.content = Some(ContentSpec::File(path.into()));
        self
    }

    /// Operation name
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Scripted arguments, if checked
    #[must_use]
    pub fn expected_args(&self) -> Option<&[Value]> {
        self.expected_args.as_deref()
    }

    /// Canned return
    #[must_use]
    pub const fn returns(&self) -> Option<&ReturnSpec> {
        self.returns.as_ref()
    }

    /// Scripted failure
    #[must_use]
    pub const fn failure(&self) -> Option<&Value> {
        self.failure.as_ref()
    }

    /// Canned sink content
    #[must_use]
    pub const fn content(&self) -> Option<&ContentSpec> {
        self.content.as_ref()
    }

    /// Resolve a relative file content path against `base`
    pub(crate) fn rebase_content(&mut self, base: &Path) {
        if let Some(ContentSpec::File(path)) = &mut self.content {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Convert back into the configuration record form
    #[must_use]
    pub fn to_record(&self) -> ExpectationRecord {
        let (return_value, return_sequence) = match &self.returns {
            Some(ReturnSpec::Value(v)) => (Some(v.clone()), None),
            Some(ReturnSpec::Sequence(s)) => (None, Some(s.clone())),
            None => (None, None),
        };
        let mut record = ExpectationRecord {
            operation: self.operation.clone(),
            expected_args: self.expected_args.clone(),
            return_value,
            return_sequence,
            failure: self.failure.clone(),
            ..ExpectationRecord::default()
        };
        match &self.content {
            Some(ContentSpec::Literal(s)) => record.content = Some(s.clone()),
            Some(ContentSpec::Base64(s)) => record.content_base64 = Some(s.clone()),
            Some(ContentSpec::File(p)) => record.content_from_file = Some(p.clone()),
            None => {}
        }
        record
    }
}

/// Expectation as it appears in a script file.
///
/// Every field is optional except `operation`; [`Expectation::try_from_record`]
/// enforces the exclusivity rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectationRecord {
    /// Operation name
    pub operation: String,
    /// Arguments the call must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_args: Option<Vec<Value>>,
    /// Single return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    /// Sequence return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_sequence: Option<Vec<Value>>,
    /// Failure to raise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Value>,
    /// Literal content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Base64 content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_base64: Option<String>,
    /// File content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_from_file: Option<PathBuf>,
}

impl Expectation {
    /// Validate a record at position `index` of a script.
    pub fn try_from_record(index: usize, record: ExpectationRecord) -> Result<Self, ConfigError> {
        let ExpectationRecord {
            operation,
            expected_args,
            return_value,
            return_sequence,
            failure,
            content,
            content_base64,
            content_from_file,
        } = record;

        if operation.trim().is_empty() {
            return Err(ConfigError::invalid(index, "operation must not be empty"));
        }

        let returns = match (return_value, return_sequence) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    index,
                    format!("'{operation}' sets both returnValue and returnSequence"),
                ))
            }
            (Some(v), None) => Some(ReturnSpec::Value(v)),
            (None, Some(s)) => Some(ReturnSpec::Sequence(s)),
            (None, None) => None,
        };

        let declared = [
            content.is_some(),
            content_base64.is_some(),
            content_from_file.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if declared > 1 {
            return Err(ConfigError::invalid(
                index,
                format!(
                    "'{operation}' sets more than one of content, contentBase64, contentFromFile"
                ),
            ));
        }

        let content = if let Some(text) = content {
            Some(ContentSpec::Literal(text))
        } else if let Some(encoded) = content_base64 {
            if let Err(e) = STANDARD.decode(encoded.trim()) {
                return Err(ConfigError::invalid(
                    index,
                    format!("'{operation}' has undecodable contentBase64: {e}"),
                ));
            }
            Some(ContentSpec::Base64(encoded))
        } else {
            content_from_file.map(ContentSpec::File)
        };

        Ok(Self {
            operation,
            expected_args,
            returns,
            failure,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(op: &str) -> ExpectationRecord {
        ExpectationRecord {
            operation: op.to_string(),
            ..ExpectationRecord::default()
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_minimal_expectation() {
            let exp = Expectation::new("navigate");
            assert_eq!(exp.operation(), "navigate");
            assert!(exp.expected_args().is_none());
            assert!(exp.returns().is_none());
            assert!(exp.failure().is_none());
            assert!(exp.content().is_none());
        }

        #[test]
        fn test_last_return_kind_wins() {
            let exp = Expectation::new("find_elements")
                .returning(json!(1))
                .returning_sequence(vec![json!("a")]);
            assert_eq!(
                exp.returns(),
                Some(&ReturnSpec::Sequence(vec![json!("a")]))
            );
        }

        #[test]
        fn test_failure_from_str() {
            let exp = Expectation::new("click").failing("Element not visible");
            assert_eq!(exp.failure(), Some(&json!("Element not visible")));
        }

        #[test]
        fn test_rebase_only_relative_paths() {
            let mut rel = Expectation::new("screenshot").with_content_from_file("shot.png");
            rel.rebase_content(Path::new("/fixtures"));
            assert_eq!(
                rel.content(),
                Some(&ContentSpec::File(PathBuf::from("/fixtures/shot.png")))
            );

            let mut abs = Expectation::new("screenshot").with_content_from_file("/abs/shot.png");
            abs.rebase_content(Path::new("/fixtures"));
            assert_eq!(
                abs.content(),
                Some(&ContentSpec::File(PathBuf::from("/abs/shot.png")))
            );
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_record_camel_case_keys() {
            let rec: ExpectationRecord = serde_json::from_value(json!({
                "operation": "find_element",
                "expectedArgs": ["//div"],
                "returnValue": {"id": "abc"}
            }))
            .unwrap();
            let exp = Expectation::try_from_record(0, rec).unwrap();
            assert_eq!(exp.expected_args(), Some(&[json!("//div")][..]));
            assert_eq!(exp.returns(), Some(&ReturnSpec::Value(json!({"id": "abc"}))));
        }

        #[test]
        fn test_unknown_key_rejected() {
            let rec = serde_json::from_value::<ExpectationRecord>(json!({
                "operation": "navigate",
                "returns": 1
            }));
            assert!(rec.is_err());
        }

        #[test]
        fn test_both_return_kinds_rejected() {
            let mut rec = record("find_elements");
            rec.return_value = Some(json!(1));
            rec.return_sequence = Some(vec![json!(1)]);
            let err = Expectation::try_from_record(3, rec).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidExpectation { index: 3, .. }));
        }

        #[test]
        fn test_multiple_content_kinds_rejected() {
            let mut rec = record("page_source");
            rec.content = Some("<html/>".to_string());
            rec.content_from_file = Some(PathBuf::from("page.html"));
            assert!(Expectation::try_from_record(0, rec).is_err());
        }

        #[test]
        fn test_empty_operation_rejected() {
            assert!(Expectation::try_from_record(0, record("  ")).is_err());
        }

        #[test]
        fn test_bad_base64_rejected() {
            let mut rec = record("screenshot");
            rec.content_base64 = Some("not base64!".to_string());
            assert!(Expectation::try_from_record(0, rec).is_err());
        }

        #[test]
        fn test_each_content_kind() {
            let mut lit = record("page_source");
            lit.content = Some("<html/>".to_string());
            assert_eq!(
                Expectation::try_from_record(0, lit).unwrap().content(),
                Some(&ContentSpec::Literal("<html/>".to_string()))
            );

            let mut b64 = record("screenshot");
            b64.content_base64 = Some("aGVsbG8=".to_string());
            assert_eq!(
                Expectation::try_from_record(0, b64).unwrap().content().map(ContentSpec::kind),
                Some("base64")
            );

            let mut file = record("screenshot");
            file.content_from_file = Some(PathBuf::from("shot.png"));
            assert_eq!(
                Expectation::try_from_record(0, file).unwrap().content().map(ContentSpec::kind),
                Some("file")
            );
        }

        #[test]
        fn test_to_record_preserves_fields() {
            let exp = Expectation::new("screenshot")
                .failing("boom")
                .with_content_base64("aGVsbG8=");
            let rec = exp.to_record();
            assert_eq!(rec.failure, Some(json!("boom")));
            assert_eq!(rec.content_base64.as_deref(), Some("aGVsbG8="));
            assert!(rec.content.is_none());
            assert_eq!(Expectation::try_from_record(0, rec).unwrap(), exp);
        }
    }
}
