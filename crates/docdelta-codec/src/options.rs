//! Codec configuration.

use serde::Deserialize;

/// Options controlling how histories are written and read.
///
/// Deserializable so a host application can embed it in its own
/// configuration; missing keys take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Indent encoded output.
    pub pretty: bool,
    /// Reject decoded histories whose replay does not reproduce the
    /// recorded document.
    pub verify_replay: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            verify_replay: true,
        }
    }
}

impl CodecOptions {
    /// Returns these options with `pretty` set.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns these options with `verify_replay` set.
    #[must_use]
    pub fn with_verify_replay(mut self, verify_replay: bool) -> Self {
        self.verify_replay = verify_replay;
        self
    }
}
