//! Ticket bucketing for the attendance queue
//!
//! Tickets are split by status into an open bucket (`new` and `in_progress`)
//! and a pending bucket. Finished tickets belong to the archive view and are
//! dropped here. Within the open bucket, transferred tickets are pulled to the
//! front so the hand-off banner is seen first.
//!
//! Every function is stable: relative input order is kept inside each group,
//! and nothing is sorted. Placement depends on `status` alone; a finished
//! ticket that still carries a transfer record is simply excluded.

use crate::{
    error::{Error, Result},
    types::{Ticket, TicketStatus, Transfer},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use validator::Validate;

/// Open and pending buckets of a ticket list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classified<'a> {
    /// Tickets with status `new` or `in_progress`
    pub open: Vec<&'a Ticket>,
    /// Tickets with status `pending`
    pub pending: Vec<&'a Ticket>,
}

/// Open tickets separated by whether they were handed off
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferSplit<'a> {
    /// Tickets with a transfer record, rendered first
    pub transferred: Vec<&'a Ticket>,
    /// Everything else
    pub normal: Vec<&'a Ticket>,
}

impl TransferSplit<'_> {
    /// Total number of tickets across both groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.transferred.len() + self.normal.len()
    }

    /// True only when both groups are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transferred.is_empty() && self.normal.is_empty()
    }

    /// Tickets in display order: transferred first, then normal
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.transferred.iter().chain(self.normal.iter()).copied()
    }
}

/// Reject a ticket snapshot with malformed records or repeated ids
///
/// The derivations accept anything; this is the gate used when a snapshot
/// comes from outside.
///
/// # Errors
///
/// Returns a validation error for the first offending ticket.
pub fn validate_snapshot(tickets: &[Ticket]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tickets.len());
    for ticket in tickets {
        ticket.validate().inspect_err(|e| {
            warn!(id = ticket.id, error = %e, "rejected snapshot ticket");
        })?;
        if !seen.insert(ticket.id) {
            warn!(id = ticket.id, "duplicate ticket id in snapshot");
            return Err(Error::validation(
                "id",
                format!("duplicate ticket id {}", ticket.id),
            ));
        }
    }
    Ok(())
}

/// Partition tickets into the open and pending buckets
#[must_use]
pub fn classify(tickets: &[Ticket]) -> Classified<'_> {
    let mut classified = Classified::default();
    for ticket in tickets {
        match ticket.status {
            TicketStatus::New | TicketStatus::InProgress => classified.open.push(ticket),
            TicketStatus::Pending => classified.pending.push(ticket),
            TicketStatus::Finished => {}
        }
    }

    debug!(
        total = tickets.len(),
        open = classified.open.len(),
        pending = classified.pending.len(),
        "classified tickets"
    );
    classified
}

/// Split tickets into transferred and normal groups, keeping order in each
#[must_use]
pub fn split_by_transfer<'a>(tickets: &[&'a Ticket]) -> TransferSplit<'a> {
    let (transferred, normal): (Vec<_>, Vec<_>) =
        tickets.iter().copied().partition(|t| t.is_transferred());
    TransferSplit {
        transferred,
        normal,
    }
}

/// Everything the attendance list renders for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketBoard<'a> {
    /// Open tickets, transferred ones first
    pub open: TransferSplit<'a>,
    /// Pending tickets
    pub pending: Vec<&'a Ticket>,
}

impl<'a> TicketBoard<'a> {
    /// Build the board for a ticket snapshot
    #[must_use]
    pub fn build(tickets: &'a [Ticket]) -> Self {
        let Classified { open, pending } = classify(tickets);
        Self {
            open: split_by_transfer(&open),
            pending,
        }
    }

    /// Badge count of the open section
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Badge count of the pending section
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether the open section shows its empty state
    #[must_use]
    pub fn open_is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Whether the pending section shows its empty state
    #[must_use]
    pub fn pending_is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Transfer banners for the highlighted group, in display order
    pub fn banners(&self) -> impl Iterator<Item = (&'a Ticket, &'a Transfer)> + '_ {
        self.open
            .transferred
            .iter()
            .filter_map(|&t| t.transfer.as_ref().map(|tr| (t, tr)))
    }
}

/// One kanban column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanColumn<'a> {
    /// Status shared by every card in the column
    pub status: TicketStatus,
    /// Cards in input order
    pub tickets: Vec<&'a Ticket>,
}

/// Tickets grouped into one column per status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard<'a> {
    /// Columns in lifecycle order: new, in progress, pending, finished
    pub columns: Vec<KanbanColumn<'a>>,
}

impl<'a> KanbanBoard<'a> {
    /// Group tickets by status
    #[must_use]
    pub fn build(tickets: &'a [Ticket]) -> Self {
        let columns = TicketStatus::ALL
            .into_iter()
            .map(|status| KanbanColumn {
                status,
                tickets: tickets.iter().filter(|t| t.status == status).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Column for `status`
    #[must_use]
    pub fn column(&self, status: TicketStatus) -> Option<&KanbanColumn<'a>> {
        self.columns.iter().find(|c| c.status == status)
    }
}
