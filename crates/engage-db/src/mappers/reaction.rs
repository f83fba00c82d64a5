//! Reaction model <-> entity mapper

use engage_core::entities::Reaction;
use engage_core::error::DomainError;
use engage_core::value_objects::{ReactionKind, TargetKind, TargetRef, UserId};

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let target_kind: TargetKind = model.target_kind.parse()?;
        let kind: ReactionKind = model.kind.parse()?;
        Ok(Reaction {
            user_id: UserId::new(model.user_id),
            target: TargetRef::new(target_kind, model.target_id),
            kind,
            created_at: model.created_at,
        })
    }
}
