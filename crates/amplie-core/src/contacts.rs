//! Contact filtering for the contacts page
//!
//! A contact is kept when it passes three stages, checked in this order with
//! short-circuit evaluation:
//!
//! 1. ownership scope (`all`, or `mine` for the logged-in agent)
//! 2. free-text search over name, phone and e-mail
//! 3. structured criteria: department, status and tag
//!
//! Filtering is stable and never fails. The summary cards are computed over
//! the unfiltered master list, see [`ContactSummary::compute`].

use crate::{
    types::{Contact, ContactStatus},
    utils::{fold_text, folded_contains, non_empty},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tag counted by the VIP summary card unless configured otherwise
pub const DEFAULT_VIP_TAG: &str = "VIP";

/// Which contacts the list starts from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// Every contact in the tenant
    #[default]
    All,
    /// Only contacts the current agent has handled
    Mine,
}

/// Ownership scope of the contact list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactScope {
    /// All or mine
    pub mode: ScopeMode,
    /// Logged-in agent, used when `mode` is [`ScopeMode::Mine`]
    pub current_agent: String,
}

impl ContactScope {
    /// Scope covering every contact
    pub fn all(current_agent: impl Into<String>) -> Self {
        Self {
            mode: ScopeMode::All,
            current_agent: current_agent.into(),
        }
    }

    /// Scope restricted to contacts associated with `current_agent`
    pub fn mine(current_agent: impl Into<String>) -> Self {
        Self {
            mode: ScopeMode::Mine,
            current_agent: current_agent.into(),
        }
    }

    /// Whether `contact` is inside this scope
    #[must_use]
    pub fn admits(&self, contact: &Contact) -> bool {
        match self.mode {
            ScopeMode::All => true,
            ScopeMode::Mine => contact.is_associated_with(&self.current_agent),
        }
    }
}

/// Structured filters from the filter panel; empty values are ignored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactCriteria {
    /// Sector of the last interaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Contact status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    /// Tag the contact must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ContactCriteria {
    /// Require this last department
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Require this status
    #[must_use]
    pub const fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require this tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Whether no criterion is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_empty(self.department.as_deref()).is_none()
            && self.status.is_none()
            && non_empty(self.tag.as_deref()).is_none()
    }

    /// Whether `contact` satisfies every active criterion
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(department) = non_empty(self.department.as_deref())
            && contact.last_department != department
        {
            return false;
        }
        if let Some(status) = self.status
            && contact.status != status
        {
            return false;
        }
        if let Some(tag) = non_empty(self.tag.as_deref())
            && !contact.has_tag(tag)
        {
            return false;
        }
        true
    }
}

/// Prepared free-text search term
///
/// The term is lowercased for the phone test and also folded (lowercased
/// with diacritics removed) for the name and e-mail tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    lowered: String,
    folded: String,
}

impl SearchTerm {
    /// Prepare `text`; `None` when it is empty and search is disabled
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            lowered: text.to_lowercase(),
            folded: fold_text(text),
        })
    }

    /// Whether `contact` matches by name, phone or e-mail
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        folded_contains(&contact.name, &self.folded)
            || contact.phone.contains(&self.lowered)
            || contact
                .email
                .as_deref()
                .is_some_and(|email| folded_contains(email, &self.folded))
    }
}

/// A complete filter selection, reusable across snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFilter {
    scope: ContactScope,
    search: Option<SearchTerm>,
    criteria: ContactCriteria,
}

impl ContactFilter {
    /// Prepare a filter from the current selections
    #[must_use]
    pub fn new(scope: ContactScope, search_text: &str, criteria: ContactCriteria) -> Self {
        Self {
            scope,
            search: SearchTerm::new(search_text),
            criteria,
        }
    }

    /// Whether `contact` passes every enabled stage
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        self.scope.admits(contact)
            && self.search.as_ref().is_none_or(|term| term.matches(contact))
            && self.criteria.matches(contact)
    }

    /// Keep the contacts that pass, in input order
    #[must_use]
    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        let kept: Vec<&Contact> = contacts.iter().filter(|c| self.matches(c)).collect();
        debug!(
            total = contacts.len(),
            kept = kept.len(),
            scope = ?self.scope.mode,
            search = self.search.is_some(),
            "filtered contacts"
        );
        kept
    }
}

/// Filter `contacts` by scope, search text and structured criteria
#[must_use]
pub fn filter<'a>(
    contacts: &'a [Contact],
    scope: &ContactScope,
    search_text: &str,
    criteria: &ContactCriteria,
) -> Vec<&'a Contact> {
    ContactFilter::new(scope.clone(), search_text, criteria.clone()).apply(contacts)
}

/// Counts shown on the summary cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactSummary {
    /// Every contact in the master list
    pub total: usize,
    /// Contacts associated with the current agent
    pub mine: usize,
    /// Contacts with status `active`
    pub active: usize,
    /// Contacts tagged as VIP
    pub vip: usize,
}

impl ContactSummary {
    /// Count over the unfiltered master list
    ///
    /// Pass the full list, not a filtered view: the cards describe the whole
    /// tenant regardless of the current search.
    #[must_use]
    pub fn compute(contacts: &[Contact], current_agent: &str, vip_tag: &str) -> Self {
        contacts.iter().fold(
            Self {
                total: contacts.len(),
                ..Self::default()
            },
            |mut summary, contact| {
                summary.mine += usize::from(contact.is_associated_with(current_agent));
                summary.active += usize::from(contact.status == ContactStatus::Active);
                summary.vip += usize::from(contact.has_tag(vip_tag));
                summary
            },
        )
    }
}
