//! Contact master list owned by the contacts page

use crate::{
    contacts::{ContactCriteria, ContactFilter, ContactScope, ContactSummary, DEFAULT_VIP_TAG},
    error::{Error, Result},
    types::{Contact, ContactId},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use validator::Validate;

/// Filtered rows plus the summary cards for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView<'a> {
    /// Summary over the whole book
    pub summary: ContactSummary,
    /// Rows passing the current filter, in book order
    pub contacts: Vec<&'a Contact>,
}

/// Owns the contacts of one page and applies create, edit and delete
#[derive(Debug, Clone)]
pub struct ContactBook {
    contacts: Vec<Contact>,
    vip_tag: String,
}

impl ContactBook {
    /// Create an empty book
    #[must_use]
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            vip_tag: DEFAULT_VIP_TAG.to_string(),
        }
    }

    /// Load a snapshot, keeping its ids
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first malformed contact, or when
    /// two contacts share an id.
    pub fn from_snapshot(contacts: Vec<Contact>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            contact.validate().inspect_err(|e| {
                warn!(id = contact.id, error = %e, "rejected snapshot contact");
            })?;
            if !seen.insert(contact.id) {
                warn!(id = contact.id, "duplicate contact id in snapshot");
                return Err(Error::validation(
                    "id",
                    format!("duplicate contact id {}", contact.id),
                ));
            }
        }

        debug!(count = contacts.len(), "contact snapshot loaded");
        Ok(Self {
            contacts,
            ..Self::new()
        })
    }

    /// Use `tag` for the VIP summary card
    #[must_use]
    pub fn vip_tag(mut self, tag: impl Into<String>) -> Self {
        self.vip_tag = tag.into();
        self
    }

    /// All contacts in insertion order
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book holds no contacts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Look up a contact by id
    #[must_use]
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    fn next_id(&self) -> Result<ContactId> {
        match self.contacts.iter().map(|c| c.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| Error::Other(format!("no contact id left after {max}"))),
        }
    }

    /// Add a new contact, assigning it the next free id
    ///
    /// # Errors
    ///
    /// Returns a validation error if the contact is malformed.
    pub fn add(&mut self, mut contact: Contact) -> Result<&Contact> {
        contact.id = self.next_id()?;
        contact.validate().inspect_err(|e| {
            warn!(name = %contact.name, error = %e, "rejected new contact");
        })?;

        info!(id = contact.id, name = %contact.name, "contact created");
        let index = self.contacts.len();
        self.contacts.push(contact);
        self.contacts
            .get(index)
            .ok_or_else(|| Error::Other("contact vanished after insert".to_string()))
    }

    /// Replace the contact that has the same id
    ///
    /// # Errors
    ///
    /// Returns a validation error if the contact is malformed, or
    /// [`Error::NotFound`] if no contact has its id.
    pub fn update(&mut self, contact: Contact) -> Result<()> {
        contact.validate().inspect_err(|e| {
            warn!(id = contact.id, error = %e, "rejected contact update");
        })?;

        let slot = self
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or_else(|| Error::contact_not_found(contact.id))?;

        info!(id = contact.id, name = %contact.name, "contact updated");
        *slot = contact;
        Ok(())
    }

    /// Remove and return the contact with `id`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no contact has this id.
    pub fn remove(&mut self, id: ContactId) -> Result<Contact> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::contact_not_found(id))?;

        let removed = self.contacts.remove(index);
        info!(id, name = %removed.name, "contact removed");
        Ok(removed)
    }

    /// Summary cards for `current_agent`
    #[must_use]
    pub fn summary(&self, current_agent: &str) -> ContactSummary {
        ContactSummary::compute(&self.contacts, current_agent, &self.vip_tag)
    }

    /// Filtered rows and summary for the current selections
    #[must_use]
    pub fn view(
        &self,
        scope: &ContactScope,
        search_text: &str,
        criteria: &ContactCriteria,
    ) -> ContactView<'_> {
        let filter = ContactFilter::new(scope.clone(), search_text, criteria.clone());
        ContactView {
            summary: self.summary(&scope.current_agent),
            contacts: filter.apply(&self.contacts),
        }
    }
}

impl Default for ContactBook {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Contact>> for ContactBook {
    type Error = Error;

    fn try_from(contacts: Vec<Contact>) -> Result<Self> {
        Self::from_snapshot(contacts)
    }
}
