//! Console message and page error capture
//!
//! Subscribes to the Runtime and Log CDP domains and prints every console
//! message and uncaught exception to stdout as it arrives. Listeners must be
//! attached before navigation so messages emitted during page load are not
//! missed.

use std::str::FromStr;
use std::sync::Arc;

use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Runtime::RemoteObject;
use tracing::debug;
use uiprobe_core::{ConsoleEvent, ConsoleSeverity, ProbeError, Result};

use crate::session::BrowserSession;

/// Attach stdout-printing listeners for console messages and page errors
pub fn attach_console_printer(session: &BrowserSession) -> Result<()> {
    let tab = session.tab();

    tab.enable_runtime()
        .map_err(|e| ProbeError::Other(format!("Failed to enable Runtime domain: {}", e)))?;
    tab.enable_log()
        .map_err(|e| ProbeError::Other(format!("Failed to enable Log domain: {}", e)))?;

    tab.add_event_listener(Arc::new(move |event: &Event| match event {
        Event::RuntimeConsoleAPICalled(e) => {
            let severity = severity_from_cdp(&format!("{:?}", e.params.Type));
            let message = join_arguments(&e.params.args);
            println!("{}", ConsoleEvent::new(severity, message).to_line());
        }
        Event::RuntimeExceptionThrown(e) => {
            let details = &e.params.exception_details;
            let message = details
                .exception
                .as_ref()
                .and_then(|exception| exception.description.clone())
                .unwrap_or_else(|| details.text.clone());
            println!("{}", page_error_line(&message));
        }
        Event::LogEntryAdded(e) => {
            let entry = &e.params.entry;
            let severity = severity_from_cdp(&format!("{:?}", entry.level));
            println!(
                "{}",
                ConsoleEvent::new(severity, entry.text.clone()).to_line()
            );
        }
        _ => {}
    }))
    .map_err(|e| ProbeError::Other(format!("Failed to register console listener: {}", e)))?;

    debug!("Console listeners attached");
    Ok(())
}

/// Map a CDP level or console call type onto a severity
///
/// Unrecognized labels (`trace`, `table`, `dir`, ...) fall back to `log`.
pub(crate) fn severity_from_cdp(label: &str) -> ConsoleSeverity {
    ConsoleSeverity::from_str(&label.to_lowercase()).unwrap_or_default()
}

/// Format a page error the way the probe reports it
pub(crate) fn page_error_line(message: &str) -> String {
    format!("PAGE ERROR: {}", message)
}

/// Render one console argument the way DevTools would show it
fn render_remote_object(object: &RemoteObject) -> String {
    if let Some(value) = &object.value {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    } else if let Some(description) = &object.description {
        description.clone()
    } else if let Some(unserializable) = &object.unserializable_value {
        unserializable.clone()
    } else {
        format!("{:?}", object.Type).to_lowercase()
    }
}

fn join_arguments(args: &[RemoteObject]) -> String {
    args.iter()
        .map(render_remote_object)
        .collect::<Vec<_>>()
        .join(" ")
}
