//! Data transfer objects for service operations

mod mappers;
mod requests;
mod responses;

pub use requests::{RecordLeadViewRequest, ToggleReactionRequest, UpdateNotesRequest};
pub use responses::{
    EngagementResponse, ReactionSummaryResponse, ReactorResponse, ViewerCountResponse,
};
