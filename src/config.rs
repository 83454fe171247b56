//! Settings that change which observance a lookup follows.

use serde::{Deserialize, Serialize};

/// Where the calendar is observed.
///
/// Festivals outside Israel last a day longer, which shifts the weekly
/// readings in some years. Deserializes from a table such as
/// `{ israel = true }`; a missing field means the Diaspora.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Observance {
    /// Follow the custom of Israel rather than the Diaspora.
    pub israel: bool,
}

impl Observance {
    /// The Diaspora.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_israel(mut self, israel: bool) -> Self {
        self.israel = israel;
        self
    }
}
