//! Commands produced by the AI, one per monster per tick.

use std::collections::BTreeMap;
use std::fmt;

use crate::state::{ActorId, Position, Tick};

/// Where a skill use is aimed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillUseTarget {
    None,
    Character(ActorId),
    Position(Position),
}

/// A skill cast request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillUse {
    pub skill_id: String,
    pub target: SkillUseTarget,
}

/// The action part of a [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandKind {
    Move(Position),
    UseSkill(SkillUse),
    /// Advisory text; never needed for correctness.
    Yell(String),
}

/// One externally visible command.
///
/// `status` is a short human readable note for observability only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub kind: CommandKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub status: Option<String>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self { kind, status: None }
    }

    pub fn move_to(position: Position) -> Self {
        Self::new(CommandKind::Move(position))
    }

    pub fn use_skill(skill_id: impl Into<String>, target: SkillUseTarget) -> Self {
        Self::new(CommandKind::UseSkill(SkillUse {
            skill_id: skill_id.into(),
            target,
        }))
    }

    pub fn yell(text: impl Into<String>) -> Self {
        Self::new(CommandKind::Yell(text.into()))
    }

    #[must_use]
    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CommandKind::Move(pos) => write!(f, "move {pos}")?,
            CommandKind::UseSkill(SkillUse { skill_id, target }) => match target {
                SkillUseTarget::None => write!(f, "use {skill_id}")?,
                SkillUseTarget::Character(id) => write!(f, "use {skill_id} on {id}")?,
                SkillUseTarget::Position(pos) => write!(f, "use {skill_id} at {pos}")?,
            },
            CommandKind::Yell(text) => write!(f, "yell {text:?}")?,
        }
        if let Some(status) = &self.status {
            write!(f, " ({status})")?;
        }
        Ok(())
    }
}

/// All commands decided in one tick, keyed by monster.
///
/// The map shape makes "at most one command per monster" structural.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandBatch {
    pub tick: Tick,
    pub commands: BTreeMap<ActorId, Command>,
}

impl CommandBatch {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            commands: BTreeMap::new(),
        }
    }

    /// Records `command` for `monster`, returning any command it replaces.
    pub fn insert(&mut self, monster: ActorId, command: Command) -> Option<Command> {
        self.commands.insert(monster, command)
    }

    pub fn get(&self, monster: &ActorId) -> Option<&Command> {
        self.commands.get(monster)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, &Command)> {
        self.commands.iter()
    }
}
