//! Well-known port table.
//!
//! Maps the ports probed by the IP lookup to the service conventionally
//! listening there. The mapping is a label only; nothing verifies that the
//! named service is what actually answers.

use crate::types::Port;
use serde::{Deserialize, Serialize};

/// A port and its conventional service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellKnownPort {
    pub port: Port,
    pub service: String,
}

/// Ordered list of well-known ports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortTable(Vec<WellKnownPort>);

impl PortTable {
    pub fn iter(&self) -> impl Iterator<Item = &WellKnownPort> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<WellKnownPort> for PortTable {
    fn from_iter<I: IntoIterator<Item = WellKnownPort>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
