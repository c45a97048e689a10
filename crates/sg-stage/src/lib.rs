//! # sg-stage — Segalla Stage System
//!
//! Defines the canonical moments of a spin that the engine reports to its
//! rendering collaborator. The renderer never inspects engine internals,
//! it only reacts to STAGES.
//!
//! ## Flow
//!
//! ```text
//! SpinStart → ReelFrame × N → SpinSettled
//!     ├── MultiplierDrawn → WinPresent → BigWinStart?
//!     └── BonusEnter → BonusFadeSpin* → BonusActivate → BonusLock* → BonusExit
//! → SpinEnd
//! ```

pub mod event;
pub mod stage;
pub mod taxonomy;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use taxonomy::*;
pub use trace::*;
