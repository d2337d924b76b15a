//! Lesson lifecycle actions and their policies.
//!
//! | Action | Guard | Target | State precondition | Credential |
//! |--------|-------|--------|--------------------|------------|
//! | approve (plan) | teacher | planned | - | no |
//! | reject | teacher | rejected | - | no |
//! | cancel | either | cancelled | ongoing: teacher only; planned: any party; else refused | no |
//! | start | teacher | ongoing | - | yes |
//! | join | either | - | ongoing only | yes |
//! | finish | teacher | finished | - | no |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ActorContext, Guard, Lesson, LessonError};
use crate::domain::fsm::StateName;

/// A lifecycle operation an actor can request on an existing lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonAction {
    Approve,
    Reject,
    Cancel,
    Start,
    Finish,
    Join,
}

/// What the current state demands beyond the action's base guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePolicy {
    /// Nothing extra; the engine's edge check decides.
    Unrestricted,
    /// An additional guard applies in this state.
    RequireGuard(Guard),
    /// The action is refused in this state before the engine is consulted.
    Refused,
}

impl LessonAction {
    /// Every action, in display order.
    pub const ALL: [LessonAction; 6] = [
        LessonAction::Approve,
        LessonAction::Reject,
        LessonAction::Cancel,
        LessonAction::Start,
        LessonAction::Finish,
        LessonAction::Join,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonAction::Approve => "approve",
            LessonAction::Reject => "reject",
            LessonAction::Cancel => "cancel",
            LessonAction::Start => "start",
            LessonAction::Finish => "finish",
            LessonAction::Join => "join",
        }
    }

    /// State the action moves the lesson to. `None` for Join, which never
    /// causes a transition.
    pub fn target_state(&self) -> Option<StateName> {
        match self {
            LessonAction::Approve => Some(StateName::Planned),
            LessonAction::Reject => Some(StateName::Rejected),
            LessonAction::Cancel => Some(StateName::Cancelled),
            LessonAction::Start => Some(StateName::Ongoing),
            LessonAction::Finish => Some(StateName::Finished),
            LessonAction::Join => None,
        }
    }

    /// Relationship required regardless of state.
    pub fn guard(&self) -> Guard {
        match self {
            LessonAction::Approve
            | LessonAction::Reject
            | LessonAction::Start
            | LessonAction::Finish => Guard::TeacherOfLesson,
            LessonAction::Cancel | LessonAction::Join => Guard::EitherParty,
        }
    }

    /// Preconditions that depend on the observed state and cannot be
    /// expressed as a plain edge.
    pub fn state_policy(&self, current: StateName) -> StatePolicy {
        match (self, current) {
            (LessonAction::Cancel, StateName::Ongoing) => {
                StatePolicy::RequireGuard(Guard::TeacherOfLesson)
            }
            (LessonAction::Cancel, StateName::Planned) => StatePolicy::Unrestricted,
            (LessonAction::Cancel, _) => StatePolicy::Refused,
            (LessonAction::Join, StateName::Ongoing) => StatePolicy::Unrestricted,
            (LessonAction::Join, _) => StatePolicy::Refused,
            _ => StatePolicy::Unrestricted,
        }
    }

    /// Returns true if a successful action hands out a meeting credential.
    pub fn issues_credential(&self) -> bool {
        matches!(self, LessonAction::Start | LessonAction::Join)
    }

    /// Returns true if authorization depends on the observed state, in which
    /// case the transition must only apply from that exact state.
    pub fn pins_observed_state(&self) -> bool {
        matches!(self, LessonAction::Cancel | LessonAction::Join)
    }

    /// Evaluates the role guard, then the state precondition.
    ///
    /// The order is fixed: a disallowed actor is rejected before anything
    /// about the lesson's state is revealed.
    pub fn authorize(
        &self,
        lesson: &Lesson,
        actor: &ActorContext,
        current: StateName,
    ) -> Result<(), LessonError> {
        self.guard().check(lesson, actor)?;
        self.check_state_policy(lesson, actor, current)
    }

    /// Evaluates only the state precondition. Callers must have checked
    /// [`LessonAction::guard`] already.
    pub fn check_state_policy(
        &self,
        lesson: &Lesson,
        actor: &ActorContext,
        current: StateName,
    ) -> Result<(), LessonError> {
        match self.state_policy(current) {
            StatePolicy::Unrestricted => Ok(()),
            StatePolicy::RequireGuard(guard) => guard.check(lesson, actor),
            StatePolicy::Refused => Err(LessonError::action_not_allowed(*self, current)),
        }
    }
}

impl fmt::Display for LessonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonAction {
    type Err = LessonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "plan" => Ok(LessonAction::Approve),
            "reject" => Ok(LessonAction::Reject),
            "cancel" => Ok(LessonAction::Cancel),
            "start" => Ok(LessonAction::Start),
            "finish" => Ok(LessonAction::Finish),
            "join" => Ok(LessonAction::Join),
            other => Err(LessonError::UnknownAction(other.to_string())),
        }
    }
}
