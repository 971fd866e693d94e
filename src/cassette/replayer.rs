//! Serves recorded outputs back, one port at a time.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays one port's interactions in recorded order, per method.
pub struct CassetteReplayer {
    port: String,
    queues: HashMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Builds a replayer over the interactions `cassette` recorded for `port`.
    #[must_use]
    pub fn for_port(cassette: &Cassette, port: &str) -> Self {
        let mut queues: HashMap<String, VecDeque<Interaction>> = HashMap::new();
        for interaction in cassette.interactions.iter().filter(|i| i.port == port) {
            queues.entry(interaction.method.clone()).or_default().push_back(interaction.clone());
        }
        Self { port: port.to_string(), queues }
    }

    /// Takes the next recorded output for `method`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette holds no further call to `method`; a replayed
    /// run that diverges from its recording is a broken test.
    pub fn next_output(&mut self, method: &str) -> serde_json::Value {
        let port = &self.port;
        match self.queues.get_mut(method).map(VecDeque::pop_front) {
            Some(Some(interaction)) => interaction.output,
            Some(None) => {
                panic!("Cassette exhausted: every recorded {port}::{method} call was consumed")
            }
            None => {
                let mut recorded: Vec<&str> = self.queues.keys().map(String::as_str).collect();
                recorded.sort_unstable();
                panic!(
                    "Cassette has no {port}::{method} calls. Recorded methods: [{}]",
                    recorded.join(", ")
                );
            }
        }
    }
}

/// Splits a `{"ok": v}` / `{"err": msg}` output into a `Result`.
///
/// # Errors
///
/// Returns the recorded error message, or a description of why `output`
/// could not be decoded as `T`.
pub fn decode_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to decode: {e}").into())
}
