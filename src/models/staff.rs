use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::{SaturdayPolicy, Schedule};

/// A staff member and the schedule they own. Storage is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub schedule: Schedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    pub fn new(first_name: String, last_name: String, saturday: SaturdayPolicy) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            schedule: Schedule::with_saturday_policy(saturday),
            created_at: now,
            updated_at: now,
        }
    }

    /// Swap in a whole new schedule.
    pub fn replace_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
        self.updated_at = Utc::now();
    }
}

/// Body for POST /staff/draft.
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub first_name: String,
    pub last_name: String,
    /// Falls back to the server's configured policy.
    pub saturday: Option<SaturdayPolicy>,
}
