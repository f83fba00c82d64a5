//! Lead engagement model <-> entity mapper

use engage_core::entities::LeadEngagement;
use engage_core::value_objects::UserId;

use crate::models::LeadEngagementModel;

impl From<LeadEngagementModel> for LeadEngagement {
    fn from(model: LeadEngagementModel) -> Self {
        LeadEngagement {
            lead_id: model.lead_id,
            ca_id: UserId::new(model.ca_id),
            viewed_at: model.viewed_at,
            is_hidden: model.is_hidden,
            hidden_at: model.hidden_at,
            notes: model.notes,
            updated_at: model.updated_at,
        }
    }
}
