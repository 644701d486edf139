//! Decision providers for controlled monsters.

pub mod ai;
