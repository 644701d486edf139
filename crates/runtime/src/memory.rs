//! Tick-to-tick memory of each controlled monster.
//!
//! Memory is double buffered: a decision reads the carried-over `current`
//! record (aged for the new tick) and the untouched `previous` one, and
//! returns a fresh record that the dispatcher commits afterwards. Nothing a
//! decision writes is visible until the following tick.

use std::collections::HashMap;
use std::mem;

use game_core::{ActorId, Position};

/// What a monster decided to do, recorded for the next tick.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DecisionState {
    #[default]
    Idle,
    Dead,
    /// Algorithm tag says the monster has no behaviour.
    Disabled,
    Stunned,
    UsingSkill,
    Moving,
    /// Fallback: walking toward a visible hostile.
    Chasing,
    /// Fallback: continuing toward a committed target.
    Wandering,
}

/// Memory record of one monster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotMemory {
    /// Far movement goal the monster is committed to.
    pub target_position: Option<Position>,
    /// Ticks left before `target_position` is abandoned.
    pub target_timeout: u32,
    pub state: DecisionState,
    /// Tile the monster decided from.
    pub position: Option<Position>,
    /// Status lines gathered during the current decision.
    pub yells: Vec<String>,
}

impl BotMemory {
    /// Memory carried into a new tick for a monster standing on `position`.
    ///
    /// The timeout counts down; the target is dropped once reached or
    /// expired. Yells never carry over.
    pub fn aged(&self, position: Position) -> Self {
        let target_timeout = self.target_timeout.saturating_sub(1);
        let target_position = self
            .target_position
            .filter(|target| *target != position && target_timeout > 0);

        Self {
            target_position,
            target_timeout: if target_position.is_some() {
                target_timeout
            } else {
                0
            },
            state: self.state,
            position: self.position,
            yells: Vec::new(),
        }
    }

    pub fn commit_target(&mut self, target: Position, timeout: u32) {
        self.target_position = Some(target);
        self.target_timeout = timeout;
    }

    pub fn clear_target(&mut self) {
        self.target_position = None;
        self.target_timeout = 0;
    }

    /// Whether this record wandered toward its goal from `position`.
    pub fn wandered_from(&self, position: Position) -> bool {
        self.state == DecisionState::Wandering && self.position == Some(position)
    }

    pub fn yell(&mut self, text: impl Into<String>) {
        self.yells.push(text.into());
    }

    /// All yells joined into one status line, `None` when silent.
    pub fn status(&self) -> Option<String> {
        (!self.yells.is_empty()).then(|| self.yells.join("; "))
    }
}

/// Double-buffered memory of one monster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySlot {
    pub current: BotMemory,
    pub previous: BotMemory,
}

impl MemorySlot {
    /// Installs `next` as current and shifts the old current to previous.
    pub fn commit(&mut self, next: BotMemory) {
        self.previous = mem::replace(&mut self.current, next);
    }
}

/// Memory of every controlled monster, owned by the dispatcher.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<ActorId, MemorySlot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ActorId) -> Option<&MemorySlot> {
        self.slots.get(id)
    }

    /// Removes and returns the slot of `id`, or a fresh one.
    ///
    /// Used to hand a slot exclusively to one decision.
    pub fn take(&mut self, id: &ActorId) -> MemorySlot {
        self.slots.remove(id).unwrap_or_default()
    }

    pub fn insert(&mut self, id: ActorId, slot: MemorySlot) {
        self.slots.insert(id, slot);
    }

    /// Drops slots of monsters for which `keep` returns false.
    ///
    /// Returns the number of slots removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&ActorId) -> bool) -> usize {
        let before = self.slots.len();
        self.slots.retain(|id, _| keep(id));
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
