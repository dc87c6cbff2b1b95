//! Shared vocabulary for the LastSignal simulation.
//!
//! Plain structured records exchanged between the engine, the narrator,
//! and any session layer: fragment/faction/action enums, world events,
//! the append-only event log, and boundary snapshots/reports.

pub mod event;
pub mod kinds;
pub mod snapshot;

pub use event::{EventCategory, EventLog, WorldEvent};
pub use kinds::{ActionKind, FactionState, FragmentKind};
pub use snapshot::{
    FactionSummary, FragmentDisclosure, GameSnapshot, NarrativeReport, PlayerSummary, TruthReveal,
    VictoryReport,
};
