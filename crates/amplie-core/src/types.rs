//! Core data types for the Amplie attendance dashboard

use crate::utils::parse_timestamp;
use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Ticket identifier type
pub type TicketId = u64;

/// Contact identifier type
pub type ContactId = u64;

/// Ordered tag set; membership drives filtering, order only drives display
pub type Tags = IndexSet<String>;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly arrived, not yet picked up
    New,
    /// Being handled by an agent
    InProgress,
    /// Waiting on the customer or a third party
    Pending,
    /// Closed
    Finished,
}

impl TicketStatus {
    /// All statuses in lifecycle order
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Pending, Self::Finished];

    /// Whether tickets with this status belong to the open bucket
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::New | Self::InProgress)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Pending => write!(f, "pending"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "pending" => Ok(Self::Pending),
            "finished" => Ok(Self::Finished),
            other => Err(crate::Error::validation(
                "status",
                format!("unknown ticket status '{other}'"),
            )),
        }
    }
}

/// Hand-off record attached to a ticket moved from another agent or department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transfer {
    /// Agent or department the ticket came from
    pub from_agent: String,

    /// Why it was handed off
    pub reason: String,

    /// Display timestamp of the hand-off
    pub transferred_at: String,
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transfer from {} at {} (reason: {})",
            self.from_agent, self.transferred_at, self.reason
        )
    }
}

/// A customer-service attendance record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Customer display name
    #[validate(length(min = 1))]
    pub customer_name: String,

    /// Customer phone number
    pub phone: String,

    /// Preview of the latest message
    #[serde(default)]
    pub last_message: String,

    /// Human readable time since the last activity
    #[serde(default)]
    pub elapsed: String,

    /// Sector handling the ticket
    #[validate(length(min = 1))]
    pub department: String,

    /// Assigned agent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Labels shown on the card
    #[serde(default)]
    pub tags: Tags,

    /// Lifecycle status
    pub status: TicketStatus,

    /// Present only when the ticket was handed off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<Transfer>,
}

impl Ticket {
    /// Create a ticket with the required identity fields and empty display data
    pub fn new(
        id: TicketId,
        customer_name: impl Into<String>,
        department: impl Into<String>,
        status: TicketStatus,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            phone: String::new(),
            last_message: String::new(),
            elapsed: String::new(),
            department: department.into(),
            agent: None,
            tags: Tags::new(),
            status,
            transfer: None,
        }
    }

    /// Attach a transfer record
    #[must_use]
    pub fn with_transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = Some(transfer);
        self
    }

    /// Whether the ticket carries a transfer record
    #[must_use]
    pub const fn is_transferred(&self) -> bool {
        self.transfer.is_some()
    }
}

/// Contact lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Reachable and in good standing
    #[default]
    Active,
    /// No recent activity
    Inactive,
    /// Must not be contacted
    Blocked,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "blocked" => Ok(Self::Blocked),
            other => Err(crate::Error::validation(
                "status",
                format!("unknown contact status '{other}'"),
            )),
        }
    }
}

/// One (department, agent) pair that has handled a contact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AgentAssignment {
    /// Sector the agent worked in
    pub department: String,

    /// Agent name
    pub agent: String,
}

impl AgentAssignment {
    /// Create a new assignment pair
    pub fn new(department: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            agent: agent.into(),
        }
    }
}

/// A customer record with interaction and ownership metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,

    /// Display name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    /// Phone number, matched literally by search
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,

    /// Optional e-mail address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,

    /// Agent of the most recent interaction
    #[serde(default)]
    pub last_agent: String,

    /// Sector of the most recent interaction
    #[serde(default)]
    pub last_department: String,

    /// When the most recent interaction happened
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_interaction_at: NaiveDateTime,

    /// Labels such as `VIP`
    #[serde(default)]
    pub tags: Tags,

    /// Lifecycle status
    #[serde(default)]
    pub status: ContactStatus,

    /// Number of attendances so far
    #[serde(default)]
    pub total_interactions: u32,

    /// Every pair that has ever handled this contact
    #[serde(default)]
    #[validate(custom(function = "validate_unique_assignments"))]
    pub associated_agents: Vec<AgentAssignment>,
}

impl Contact {
    /// Whether `agent` appears in any associated pair
    #[must_use]
    pub fn is_associated_with(&self, agent: &str) -> bool {
        self.associated_agents.iter().any(|a| a.agent == agent)
    }

    /// Whether the contact carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Record that `agent` from `department` handled this contact
    ///
    /// Returns `false` when the exact pair was already present.
    pub fn associate(&mut self, department: impl Into<String>, agent: impl Into<String>) -> bool {
        let pair = AgentAssignment::new(department, agent);
        if self.associated_agents.contains(&pair) {
            return false;
        }
        self.associated_agents.push(pair);
        true
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid interaction timestamp '{raw}'")))
}

fn validate_unique_assignments(agents: &[AgentAssignment]) -> Result<(), ValidationError> {
    let mut seen = IndexSet::with_capacity(agents.len());
    for pair in agents {
        if !seen.insert(pair) {
            return Err(ValidationError::new("duplicate_assignment").with_message(Cow::Owned(
                format!("duplicate pair ({}, {})", pair.department, pair.agent),
            )));
        }
    }
    Ok(())
}
