//! JSONP callback naming and response parsing.
//!
//! A JSONP response is a script that calls a function named by the request.
//! Each in-flight call holds a uniquely named slot in a process-wide
//! registry; the slot is released when its guard drops, whichever way the
//! call ends.

use crate::error::{TransportError, TransportResult};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use tracing::debug;

static GLOBAL: LazyLock<CallbackRegistry> = LazyLock::new(CallbackRegistry::default);

/// Registry of callback names currently in use.
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    next: AtomicU64,
    active: Mutex<HashSet<String>>,
}

impl CallbackRegistry {
    /// The registry shared by every transport in the process.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Reserves a fresh callback name of the form `<prefix><n>`.
    pub fn acquire(&self, prefix: &str) -> CallbackSlot<'_> {
        let mut active = self.lock();
        let name = loop {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}{n}");
            if active.insert(candidate.clone()) {
                break candidate;
            }
        };
        drop(active);

        debug!("Acquired jsonp callback {}", name);
        CallbackSlot {
            registry: self,
            name,
        }
    }

    /// Returns whether a callback name is currently reserved.
    pub fn is_active(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Returns the reserved names starting with `prefix`.
    pub fn active_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn release(&self, name: &str) {
        self.lock().remove(name);
        debug!("Released jsonp callback {}", name);
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A reserved callback name. Dropping it frees the name.
#[derive(Debug)]
pub struct CallbackSlot<'a> {
    registry: &'a CallbackRegistry,
    name: String,
}

impl CallbackSlot<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CallbackSlot<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.name);
    }
}

/// Extracts the argument passed to `callback` from a JSONP script body.
///
/// Accepts the usual wrappers around the call, such as
/// `typeof cb === 'function' && cb({...});` or `/**/ cb({...})`. Text after
/// the call, such as a trailing comment, may itself contain parentheses: the
/// argument ends at the last `)` that leaves valid JSON before it.
pub fn parse_body(body: &str, callback: &str) -> TransportResult<Value> {
    let call = format!("{callback}(");
    let start = body
        .find(&call)
        .map(|pos| pos + call.len())
        .ok_or_else(|| TransportError::Jsonp(format!("callback {callback} not invoked")))?;

    let mut first_error = None;
    for (end, _) in body[start..].rmatch_indices(')') {
        let argument = body[start..start + end].trim();
        if argument.is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(argument) {
            Ok(value) => return Ok(value),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err.into()),
        None => Err(TransportError::Jsonp(
            "unterminated callback invocation".to_string(),
        )),
    }
}
