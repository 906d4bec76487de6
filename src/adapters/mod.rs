//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements              | Connects to              |
//! |----------------|-------------------------|--------------------------|
//! | `memory_store` | StoragePort, ConfigPort | In-process `HashMap`     |
//! | `file_store`   | StoragePort, ConfigPort | One JSON file per key    |
//! | `clock`        | ClockPort               | Wall clock / manual time |
//! | `log_sink`     | EventSink               | `log` facade             |

pub mod clock;
pub mod file_store;
pub mod log_sink;
pub mod memory_store;
