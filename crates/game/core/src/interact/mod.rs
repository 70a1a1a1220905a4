//! Player-facing interactions: hiding and gimmick sessions.

mod gimmick;
mod hide;
mod session;

pub use gimmick::GimmickNode;
pub use hide::{HideChange, HideController, HideSpot};
pub use session::{
    ChanceJudge, GimmickController, GimmickEvent, ScriptedJudge, SkillCheckJudge,
    SkillCheckRequest, SkillVerdict,
};
