//! Algorithm enum for selecting how a generation is computed.
//!
//! Both variants read the same alive snapshot and produce identical grids;
//! they differ only in whether neighbour counting fans out over rayon.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Count neighbours cell by cell on the frame thread
    #[default]
    Serial,
    /// Count neighbours with rayon, then apply the rule serially
    Parallel,
}

impl Algorithm {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }
}
