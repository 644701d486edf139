//! Skills the AI can choose from and the commands it emits.

pub mod command;
pub mod skill;

pub use command::{Command, CommandBatch, CommandKind, SkillUse, SkillUseTarget};
pub use skill::{
    EffectFlags, Skill, SkillAttributes, SkillEffect, SkillFlags, SkillTarget, Summon,
};
