//! GPIO edge-event subsystem.
//!
//! # Data Flow
//! ```text
//! Button press (line pulled LOW)
//!     → platform interrupt (pi.rs: rppal async interrupt thread)
//!       or injected edge (simulated.rs)
//!     → debounce.rs (DebouncedHandler: minimum re-trigger interval per pin)
//!     → registered EdgeHandler
//! ```
//!
//! # Design Decisions
//! - Handlers are pushed edges; nothing in the crate polls pin levels
//! - Pins use logical (BCM) numbering, never physical header positions
//! - Pull-ups are provided externally; inputs are configured floating
//! - A source owns its registrations; dropping it releases the pins

pub mod debounce;
pub mod pi;
pub mod simulated;
pub mod types;

pub use debounce::{DebouncedHandler, Debouncer};
pub use pi::RppalEdgeSource;
pub use simulated::SimulatedEdgeSource;
pub use types::{ConfigurationError, EdgeHandler, EdgeSource, PinId};
