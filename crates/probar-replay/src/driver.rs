//! WebDriver - the browser automation protocol the replay driver stands in for
//!
//! Code under test talks to a `WebDriver`. In production that is a real
//! browser backend; in tests it is a [`ReplayDriver`](crate::ReplayDriver)
//! wired with an expectation script.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  WebDriver (trait)                                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐    ┌──────────────────────────┐ │
//! │  │  Real backend        │    │  ReplayDriver            │ │
//! │  │  (CDP / WebDriver)   │    │  queue → match → resolve │ │
//! │  └──────────────────────┘    └──────────────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```

use crate::result::DriverResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Handle to a DOM element
///
/// Handles travel to the engine as their id string, so a script matches a
/// click on element `abc` with `expectedArgs: ["abc"]`. Canned returns may
/// be written either as `"abc"` or as `{ "id": "abc", "tagName": "div" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ElementRepr")]
pub struct ElementHandle {
    /// Unique identifier for the element
    pub id: String,
    /// Element tag name, when the script provides one
    #[serde(rename = "tagName", skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: None,
        }
    }

    /// Set the tag name
    #[must_use]
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    /// Argument form of this handle
    #[must_use]
    pub fn as_arg(&self) -> Value {
        Value::String(self.id.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ElementRepr {
    Id(String),
    Handle {
        id: String,
        #[serde(default, rename = "tagName", alias = "tag_name")]
        tag_name: Option<String>,
    },
}

impl From<ElementRepr> for ElementHandle {
    fn from(repr: ElementRepr) -> Self {
        match repr {
            ElementRepr::Id(id) => Self { id, tag_name: None },
            ElementRepr::Handle { id, tag_name } => Self { id, tag_name },
        }
    }
}

/// Take the first element of a `find_elements` result.
///
/// `find_elements` always yields a sequence; callers that want one element
/// collapse it here rather than in the engine.
#[must_use]
pub fn first_element(elements: Vec<ElementHandle>) -> Option<ElementHandle> {
    elements.into_iter().next()
}

/// Operations of the driver protocol, by their script name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Load a URL
    Navigate,
    /// Find one element
    FindElement,
    /// Find all matching elements
    FindElements,
    /// Click an element
    Click,
    /// Double-click an element
    DoubleClick,
    /// Run a script in the page
    ExecuteScript,
    /// Read an attribute
    GetAttribute,
    /// Write an attribute
    SetAttribute,
    /// Read visible text
    Text,
    /// Read selection state
    IsSelected,
    /// Change selection state
    SetSelected,
    /// Type into an element
    SendKeys,
    /// Read the tag name
    TagName,
    /// Dump page source into a sink
    PageSource,
    /// Capture a screenshot into a sink
    Screenshot,
    /// Change the implicit wait timeout
    SetWaitTimeout,
    /// Resize the window
    SetWindowSize,
}

impl Operation {
    /// Every operation, in protocol order
    pub const ALL: [Self; 17] = [
        Self::Navigate,
        Self::FindElement,
        Self::FindElements,
        Self::Click,
        Self::DoubleClick,
        Self::ExecuteScript,
        Self::GetAttribute,
        Self::SetAttribute,
        Self::Text,
        Self::IsSelected,
        Self::SetSelected,
        Self::SendKeys,
        Self::TagName,
        Self::PageSource,
        Self::Screenshot,
        Self::SetWaitTimeout,
        Self::SetWindowSize,
    ];

    /// Name used in expectation scripts
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::FindElement => "find_element",
            Self::FindElements => "find_elements",
            Self::Click => "click",
            Self::DoubleClick => "double_click",
            Self::ExecuteScript => "execute_script",
            Self::GetAttribute => "get_attribute",
            Self::SetAttribute => "set_attribute",
            Self::Text => "text",
            Self::IsSelected => "is_selected",
            Self::SetSelected => "set_selected",
            Self::SendKeys => "send_keys",
            Self::TagName => "tag_name",
            Self::PageSource => "page_source",
            Self::Screenshot => "screenshot",
            Self::SetWaitTimeout => "set_wait_timeout",
            Self::SetWindowSize => "set_window_size",
        }
    }

    /// Whether the operation writes into a caller-supplied sink
    #[must_use]
    pub const fn accepts_sink(&self) -> bool {
        matches!(self, Self::PageSource | Self::Screenshot)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name that is not part of the driver protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Browser automation protocol
///
/// Every method maps to one [`Operation`]. Implementations must not
/// reorder or batch calls: each call completes before it returns.
pub trait WebDriver {
    /// Navigate to URL
    fn navigate(&mut self, url: &str) -> DriverResult<()>;

    /// Query one element by selector
    fn find_element(&mut self, selector: &str) -> DriverResult<ElementHandle>;

    /// Query all matching elements
    fn find_elements(&mut self, selector: &str) -> DriverResult<Vec<ElementHandle>>;

    /// Click element
    fn click(&mut self, element: &ElementHandle) -> DriverResult<()>;

    /// Double-click element
    fn double_click(&mut self, element: &ElementHandle) -> DriverResult<()>;

    /// Execute JavaScript in page context
    fn execute_script(&mut self, script: &str, args: &[Value]) -> DriverResult<Value>;

    /// Read an attribute (`None` when absent)
    fn get_attribute(&mut self, element: &ElementHandle, name: &str)
        -> DriverResult<Option<String>>;

    /// Write an attribute
    fn set_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
        value: &str,
    ) -> DriverResult<()>;

    /// Visible text of element
    fn text(&mut self, element: &ElementHandle) -> DriverResult<String>;

    /// Whether a checkbox/option is selected
    fn is_selected(&mut self, element: &ElementHandle) -> DriverResult<bool>;

    /// Select or deselect a checkbox/option
    fn set_selected(&mut self, element: &ElementHandle, selected: bool) -> DriverResult<()>;

    /// Type text into element
    fn send_keys(&mut self, element: &ElementHandle, keys: &str) -> DriverResult<()>;

    /// Tag name of element
    fn tag_name(&mut self, element: &ElementHandle) -> DriverResult<String>;

    /// Write the page source into `sink`
    fn page_source(&mut self, sink: &mut dyn Write) -> DriverResult<()>;

    /// Write a PNG screenshot into `sink`
    fn screenshot(&mut self, sink: &mut dyn Write) -> DriverResult<()>;

    /// Set the implicit wait timeout
    fn set_wait_timeout(&mut self, timeout: Duration) -> DriverResult<()>;

    /// Resize the browser window
    fn set_window_size(&mut self, width: u32, height: u32) -> DriverResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("btn-1").with_tag_name("button");
            assert_eq!(elem.id, "btn-1");
            assert_eq!(elem.tag_name.as_deref(), Some("button"));
            assert_eq!(elem.as_arg(), json!("btn-1"));
        }

        #[test]
        fn test_deserialize_from_bare_id() {
            let elem: ElementHandle = serde_json::from_value(json!("abc")).unwrap();
            assert_eq!(elem, ElementHandle::new("abc"));
        }

        #[test]
        fn test_deserialize_from_object() {
            let elem: ElementHandle =
                serde_json::from_value(json!({"id": "abc", "tagName": "div"})).unwrap();
            assert_eq!(elem, ElementHandle::new("abc").with_tag_name("div"));

            let snake: ElementHandle =
                serde_json::from_value(json!({"id": "x", "tag_name": "a"})).unwrap();
            assert_eq!(snake.tag_name.as_deref(), Some("a"));
        }

        #[test]
        fn test_deserialize_rejects_other_shapes() {
            assert!(serde_json::from_value::<ElementHandle>(json!(42)).is_err());
            assert!(serde_json::from_value::<ElementHandle>(json!({"name": "x"})).is_err());
        }

        #[test]
        fn test_first_element() {
            let elems = vec![ElementHandle::new("a"), ElementHandle::new("b")];
            assert_eq!(first_element(elems), Some(ElementHandle::new("a")));
            assert_eq!(first_element(Vec::new()), None);
        }
    }

    mod operation_tests {
        use super::*;

        #[test]
        fn test_names_round_trip() {
            for op in Operation::ALL {
                assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
            }
        }

        #[test]
        fn test_unknown_name() {
            let err = "teleport".parse::<Operation>().unwrap_err();
            assert_eq!(err.to_string(), "Unknown operation: teleport");
        }

        #[test]
        fn test_only_sink_operations_accept_sinks() {
            let sinks: Vec<_> = Operation::ALL
                .into_iter()
                .filter(Operation::accepts_sink)
                .collect();
            assert_eq!(sinks, [Operation::PageSource, Operation::Screenshot]);
        }

        #[test]
        fn test_display() {
            assert_eq!(Operation::DoubleClick.to_string(), "double_click");
        }
    }
}
