//! Cycle API Adapters
//!
//! Implementations of the CycleLister port.
//!
//! - **HttpCycleLister** - Calls the assessment REST API with `reqwest`
//! - **InMemoryCycleLister** - Serves a fixed list (testing/development)

mod http_cycle_lister;
mod in_memory_cycle_lister;

pub use http_cycle_lister::{decode_cycle_list, HttpCycleLister, HttpCycleListerConfig};
pub use in_memory_cycle_lister::InMemoryCycleLister;
