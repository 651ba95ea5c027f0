//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that records envelopes and fans
//!   them out to listeners

mod in_memory;

pub use in_memory::InMemoryEventBus;
