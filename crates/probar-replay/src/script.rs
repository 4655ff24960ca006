//! Expectation scripts: the ordered list a replay driver is built from.
//!
//! Scripts are YAML or JSON. Either a bare list of expectation records, or
//! a mapping with `expectations` plus optional metadata:
//!
//! ```yaml
//! name: login flow
//! expectations:
//!   - operation: navigate
//!     expectedArgs: ["http://localhost:8080/login"]
//!   - operation: find_element
//!     expectedArgs: ["#user"]
//!     returnValue: { id: "user-input" }
//!   - operation: page_source
//!     contentFromFile: fixtures/login.html
//! ```

use crate::driver::Operation;
use crate::expectation::{ContentSpec, Expectation, ExpectationRecord};
use crate::result::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Ordered, validated expectations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectationScript {
    name: String,
    description: String,
    expectations: Vec<Expectation>,
}

const SHAPE_ERROR: &str =
    "script must be a list of expectations or a mapping with `expectations`";

/// Serialized form of a script
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFile {
    /// Script name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Script description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Expectation records in call order
    #[serde(default)]
    pub expectations: Vec<ExpectationRecord>,
}

impl ExpectationScript {
    /// Create a script from already-built expectations
    #[must_use]
    pub fn new(expectations: Vec<Expectation>) -> Self {
        Self {
            expectations,
            ..Self::default()
        }
    }

    /// Set the script name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an expectation
    #[must_use]
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Parse a YAML script
    ///
    /// The document shape is detected first, then the text is parsed again
    /// as that shape so errors keep the offending key and its position.
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let doc: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml)?;
        let file = match doc {
            serde_yaml_ng::Value::Sequence(_) => ScriptFile {
                expectations: serde_yaml_ng::from_str(yaml)?,
                ..ScriptFile::default()
            },
            serde_yaml_ng::Value::Mapping(_) => serde_yaml_ng::from_str::<ScriptFile>(yaml)?,
            _ => return Err(ConfigError::Yaml(serde::de::Error::custom(SHAPE_ERROR))),
        };
        Self::from_script_file(file)
    }

    /// Parse a JSON script
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let doc: serde_json::Value = serde_json::from_str(json)?;
        let file = match doc {
            serde_json::Value::Array(_) => ScriptFile {
                expectations: serde_json::from_str(json)?,
                ..ScriptFile::default()
            },
            serde_json::Value::Object(_) => serde_json::from_str::<ScriptFile>(json)?,
            _ => return Err(ConfigError::Json(serde::de::Error::custom(SHAPE_ERROR))),
        };
        Self::from_script_file(file)
    }

    /// Load a script file; `.json` is parsed as JSON, anything else as YAML.
    ///
    /// Relative `contentFromFile` paths resolve against the script's directory.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut script = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_yaml(&text)?
        };

        if let Some(base) = path.parent() {
            for expectation in &mut script.expectations {
                expectation.rebase_content(base);
            }
        }
        if script.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                script.name = stem.to_string_lossy().into_owned();
            }
        }

        tracing::debug!(
            path = %path.display(),
            expectations = script.len(),
            "loaded expectation script"
        );
        Ok(script)
    }

    fn from_script_file(file: ScriptFile) -> ConfigResult<Self> {
        let expectations = file
            .expectations
            .into_iter()
            .enumerate()
            .map(|(index, record)| Expectation::try_from_record(index, record))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self {
            name: file.name,
            description: file.description,
            expectations,
        })
    }

    /// Serializable form of this script
    #[must_use]
    pub fn to_file(&self) -> ScriptFile {
        ScriptFile {
            name: self.name.clone(),
            description: self.description.clone(),
            expectations: self.expectations.iter().map(Expectation::to_record).collect(),
        }
    }

    /// Script name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Expectations in call order
    #[must_use]
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Number of expectations
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Check if the script has no expectations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Findings that are legal but probably mistakes
    #[must_use]
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();
        for (index, expectation) in self.expectations.iter().enumerate() {
            let Ok(op) = expectation.operation().parse::<Operation>() else {
                findings.push(LintFinding {
                    index,
                    message: format!(
                        "'{}' is not a built-in driver operation",
                        expectation.operation()
                    ),
                });
                continue;
            };

            match expectation.content() {
                Some(_) if !op.accepts_sink() => findings.push(LintFinding {
                    index,
                    message: format!("'{op}' takes no output sink; its content can never be written"),
                }),
                None if op.accepts_sink() => findings.push(LintFinding {
                    index,
                    message: format!("'{op}' writes into a sink but declares no content"),
                }),
                Some(ContentSpec::File(path)) if !path.is_file() => findings.push(LintFinding {
                    index,
                    message: format!("content file {} does not exist", path.display()),
                }),
                _ => {}
            }
        }
        findings
    }
}

impl From<Vec<Expectation>> for ExpectationScript {
    fn from(expectations: Vec<Expectation>) -> Self {
        Self::new(expectations)
    }
}

/// Non-fatal problem found by [`ExpectationScript::lint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    /// Position of the expectation (0-based)
    pub index: usize,
    /// What looks wrong
    pub message: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expectation #{}: {}", self.index, self.message)
    }
}
