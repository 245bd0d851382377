// Masking of PSI values by the coverage/quality scores that accompany them in
// VAST-TOOLS inclusion tables.

pub use discard::{discard, discard_per_sample, DiscardSet};
pub use events::EventTable;

mod discard;
mod events;
