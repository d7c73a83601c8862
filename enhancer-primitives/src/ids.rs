//! Request identifier types.

use std::fmt::{self, Display, Formatter};

use uuid::Uuid;

/// Identifies a single enhancement submission in log output.
///
/// Identifiers are never persisted; they only tie together the tracing events
/// emitted while one prompt is built and sent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a random request identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
