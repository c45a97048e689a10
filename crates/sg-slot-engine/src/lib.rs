//! # sg-slot-engine — Spin engine for the Segalla 3×3 slot
//!
//! Accepts spin requests, drives the timed reel animation, resolves the
//! final grid into a payout (including the rare lock-and-respin bonus
//! event) and keeps the wager ledger consistent to the cent.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine (sole mutator of Ledger + session)
//!     │
//!     ├── Scheduler<Tick>      virtual-time timer queue
//!     ├── SpinAnimator         frame_count random grids → candidate
//!     ├── BonusEvent           fading → active → forced win / settle
//!     ├── MultiplierBands      ×2 / ×5 / ×10 draw
//!     └── paytable::evaluate   5 paylines, wild substitution
//!           │
//!           v
//!     SpinOutcome → SpinObserver (frames, stages, outcome)
//! ```
//!
//! Everything runs on one thread. Time only moves when the host calls
//! [`SlotMachine::advance_by`] or [`SlotMachine::step`], so a seeded
//! machine replays a session exactly.

pub mod animator;
pub mod bonus;
pub mod config;
pub mod entropy;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod machine;
pub mod money;
pub mod multiplier;
pub mod observer;
pub mod outcome;
pub mod paytable;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod symbols;
pub mod timing;

pub use animator::*;
pub use bonus::*;
pub use config::*;
pub use entropy::*;
pub use error::*;
pub use grid::*;
pub use ledger::*;
pub use machine::*;
pub use money::*;
pub use multiplier::*;
pub use observer::*;
pub use outcome::*;
pub use paytable::*;
pub use scheduler::*;
pub use session::*;
pub use stats::*;
pub use symbols::*;
pub use timing::*;

pub use sg_stage::{BigWinTier, Stage, StageEvent, StageTrace};
