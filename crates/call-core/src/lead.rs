//! Campaign lead types.
//!
//! Leads live in the campaign database; the session manager only tracks
//! which lead the agent is currently working as a non-owning lookup, so the
//! desktop can show lead context next to the call controls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact outcome recorded against a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Never contacted
    New,
    /// Reached at least once
    Contacted,
    /// Expressed interest
    Interested,
    #[serde(rename = "Not Interested")]
    NotInterested,
    /// Asked to be called back
    Callback,
    /// Do-Not-Call: must not be dialed again
    #[serde(rename = "DNC")]
    Dnc,
}

/// A campaign lead, as handed to the console by the campaign database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub campaign_id: String,
    pub status: LeadStatus,
    /// Whether the lead has consented to be contacted
    pub consented: bool,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
