//! Lead engagement entity - a CA's recorded view of a customer lead
//!
//! Created on the first "view contact" action, unique per (lead, CA),
//! never deleted. Hide state and notes are private to the viewing CA.

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// One CA's engagement with one lead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEngagement {
    pub lead_id: i64,
    pub ca_id: UserId,
    pub viewed_at: DateTime<Utc>,
    pub is_hidden: bool,
    pub hidden_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl LeadEngagement {
    /// Record a first view, stamped with the current time
    pub fn new(lead_id: i64, ca_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            lead_id,
            ca_id,
            viewed_at: now,
            is_hidden: false,
            hidden_at: None,
            notes: None,
            updated_at: now,
        }
    }

    /// Hide this lead from the CA's working list
    pub fn hide(&mut self) {
        let now = Utc::now();
        self.is_hidden = true;
        self.hidden_at = Some(now);
        self.updated_at = now;
    }

    /// Bring a hidden lead back into the working list
    pub fn unhide(&mut self) {
        self.is_hidden = false;
        self.hidden_at = None;
        self.updated_at = Utc::now();
    }

    /// Replace the CA's private notes (None clears them)
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.updated_at = Utc::now();
    }
}
