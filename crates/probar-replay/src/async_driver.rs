//! Async driver surface for async test code.
//!
//! Every [`WebDriver`] that is `Send` is also an [`AsyncWebDriver`]. Each
//! method runs the synchronous call to completion; nothing suspends inside
//! the engine, so call order is the order of `.await`s.

use crate::driver::{ElementHandle, WebDriver};
use crate::result::DriverResult;
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::time::Duration;

/// Async browser automation protocol
#[async_trait]
pub trait AsyncWebDriver: Send {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> DriverResult<()>;

    /// Query one element by selector
    async fn find_element(&mut self, selector: &str) -> DriverResult<ElementHandle>;

    /// Query all matching elements
    async fn find_elements(&mut self, selector: &str) -> DriverResult<Vec<ElementHandle>>;

    /// Click element
    async fn click(&mut self, element: &ElementHandle) -> DriverResult<()>;

    /// Double-click element
    async fn double_click(&mut self, element: &ElementHandle) -> DriverResult<()>;

    /// Execute JavaScript in page context
    async fn execute_script(&mut self, script: &str, args: &[Value]) -> DriverResult<Value>;

    /// Read an attribute (`None` when absent)
    async fn get_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
    ) -> DriverResult<Option<String>>;

    /// Write an attribute
    async fn set_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
        value: &str,
    ) -> DriverResult<()>;

    /// Visible text of element
    async fn text(&mut self, element: &ElementHandle) -> DriverResult<String>;

    /// Whether a checkbox/option is selected
    async fn is_selected(&mut self, element: &ElementHandle) -> DriverResult<bool>;

    /// Select or deselect a checkbox/option
    async fn set_selected(&mut self, element: &ElementHandle, selected: bool)
        -> DriverResult<()>;

    /// Type text into element
    async fn send_keys(&mut self, element: &ElementHandle, keys: &str) -> DriverResult<()>;

    /// Tag name of element
    async fn tag_name(&mut self, element: &ElementHandle) -> DriverResult<String>;

    /// Write the page source into `sink`
    async fn page_source(&mut self, sink: &mut (dyn Write + Send)) -> DriverResult<()>;

    /// Write a PNG screenshot into `sink`
    async fn screenshot(&mut self, sink: &mut (dyn Write + Send)) -> DriverResult<()>;

    /// Set the implicit wait timeout
    async fn set_wait_timeout(&mut self, timeout: Duration) -> DriverResult<()>;

    /// Resize the browser window
    async fn set_window_size(&mut self, width: u32, height: u32) -> DriverResult<()>;
}

#[async_trait]
impl<T: WebDriver + Send> AsyncWebDriver for T {
    async fn navigate(&mut self, url: &str) -> DriverResult<()> {
        WebDriver::navigate(self, url)
    }

    async fn find_element(&mut self, selector: &str) -> DriverResult<ElementHandle> {
        WebDriver::find_element(self, selector)
    }

    async fn find_elements(&mut self, selector: &str) -> DriverResult<Vec<ElementHandle>> {
        WebDriver::find_elements(self, selector)
    }

    async fn click(&mut self, element: &ElementHandle) -> DriverResult<()> {
        WebDriver::click(self, element)
    }

    async fn double_click(&mut self, element: &ElementHandle) -> DriverResult<()> {
        WebDriver::double_click(self, element)
    }

    async fn execute_script(&mut self, script: &str, args: &[Value]) -> DriverResult<Value> {
        WebDriver::execute_script(self, script, args)
    }

    async fn get_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
    ) -> DriverResult<Option<String>> {
        WebDriver::get_attribute(self, element, name)
    }

    async fn set_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
        value: &str,
    ) -> DriverResult<()> {
        WebDriver::set_attribute(self, element, name, value)
    }

    async fn text(&mut self, element: &ElementHandle) -> DriverResult<String> {
        WebDriver::text(self, element)
    }

    async fn is_selected(&mut self, element: &ElementHandle) -> DriverResult<bool> {
        WebDriver::is_selected(self, element)
    }

    async fn set_selected(
        &mut self,
        element: &ElementHandle,
        selected: bool,
    ) -> DriverResult<()> {
        WebDriver::set_selected(self, element, selected)
    }

    async fn send_keys(&mut self, element: &ElementHandle, keys: &str) -> DriverResult<()> {
        WebDriver::send_keys(self, element, keys)
    }

    async fn tag_name(&mut self, element: &ElementHandle) -> DriverResult<String> {
        WebDriver::tag_name(self, element)
    }

    async fn page_source(&mut self, sink: &mut (dyn Write + Send)) -> DriverResult<()> {
        WebDriver::page_source(self, sink)
    }

    async fn screenshot(&mut self, sink: &mut (dyn Write + Send)) -> DriverResult<()> {
        WebDriver::screenshot(self, sink)
    }

    async fn set_wait_timeout(&mut self, timeout: Duration) -> DriverResult<()> {
        WebDriver::set_wait_timeout(self, timeout)
    }

    async fn set_window_size(&mut self, width: u32, height: u32) -> DriverResult<()> {
        WebDriver::set_window_size(self, width, height)
    }
}
