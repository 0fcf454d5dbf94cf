//! Edit sessions: one per record kind, deciding whether a form submission
//! creates a new record or updates the one being edited.
//!
//! States:
//! - `Idle`: submissions create.
//! - `Editing(id)`: submissions update `id`.
//!
//! Any successful submission goes back to `Idle`. A validation error keeps the
//! current state so the form can be fixed and resubmitted. Deleting the record
//! being edited also goes back to `Idle`; deleting any other record leaves the
//! session alone.

use std::marker::PhantomData;

use tracing::debug;

use crate::error::{BudgetError, Result};
use crate::form::{self, FieldBag};
use crate::records::{PlannedFields, PlannedItem, Receipt, ReceiptFields, RecordId};
use crate::store::RecordStore;

/// A record kind that can be edited through an [`EditSession`].
pub trait Editable {
    type Fields: Clone;

    /// Human-readable kind, used in messages ("planned item", "receipt").
    const KIND: &'static str;

    fn create(store: &mut RecordStore, fields: Self::Fields) -> Result<RecordId>;
    fn update(store: &mut RecordStore, id: RecordId, fields: Self::Fields) -> Result<()>;
    fn delete(store: &mut RecordStore, id: RecordId);
    fn load(store: &RecordStore, id: RecordId) -> Option<Self::Fields>;

    fn from_form(bag: &FieldBag) -> Result<Self::Fields>;
    fn to_form(fields: &Self::Fields) -> FieldBag;
}

impl Editable for PlannedItem {
    type Fields = PlannedFields;
    const KIND: &'static str = "planned item";

    fn create(store: &mut RecordStore, fields: PlannedFields) -> Result<RecordId> {
        store.create_planned(fields)
    }

    fn update(store: &mut RecordStore, id: RecordId, fields: PlannedFields) -> Result<()> {
        store.update_planned(id, fields)
    }

    fn delete(store: &mut RecordStore, id: RecordId) {
        store.delete_planned(id)
    }

    fn load(store: &RecordStore, id: RecordId) -> Option<PlannedFields> {
        store.planned(id).map(PlannedItem::fields)
    }

    fn from_form(bag: &FieldBag) -> Result<PlannedFields> {
        form::planned_from_form(bag)
    }

    fn to_form(fields: &PlannedFields) -> FieldBag {
        form::planned_to_form(fields)
    }
}

impl Editable for Receipt {
    type Fields = ReceiptFields;
    const KIND: &'static str = "receipt";

    fn create(store: &mut RecordStore, fields: ReceiptFields) -> Result<RecordId> {
        store.create_receipt(fields)
    }

    fn update(store: &mut RecordStore, id: RecordId, fields: ReceiptFields) -> Result<()> {
        store.update_receipt(id, fields)
    }

    fn delete(store: &mut RecordStore, id: RecordId) {
        store.delete_receipt(id)
    }

    fn load(store: &RecordStore, id: RecordId) -> Option<ReceiptFields> {
        store.receipt(id).map(Receipt::fields)
    }

    fn from_form(bag: &FieldBag) -> Result<ReceiptFields> {
        form::receipt_from_form(bag)
    }

    fn to_form(fields: &ReceiptFields) -> FieldBag {
        form::receipt_to_form(fields)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing(RecordId),
}

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created(RecordId),
    Updated(RecordId),
}

impl Submission {
    pub fn id(&self) -> RecordId {
        match self {
            Submission::Created(id) | Submission::Updated(id) => *id,
        }
    }
}

#[derive(Debug)]
pub struct EditSession<R: Editable> {
    state: SessionState,
    kind: PhantomData<R>,
}

pub type PlannedSession = EditSession<PlannedItem>;
pub type ReceiptSession = EditSession<Receipt>;

impl<R: Editable> Default for EditSession<R> {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            kind: PhantomData,
        }
    }
}

impl<R: Editable> EditSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn editing(&self) -> Option<RecordId> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Editing(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Starts editing `id` and returns its current fields for the form.
    pub fn begin_edit(&mut self, store: &RecordStore, id: RecordId) -> Result<R::Fields> {
        let fields = R::load(store, id)
            .ok_or_else(|| BudgetError::not_found(format!("{} #{id}", R::KIND)))?;
        self.state = SessionState::Editing(id);
        debug!(kind = R::KIND, %id, "edit started");
        Ok(fields)
    }

    /// Creates when idle, updates the edited record otherwise.
    pub fn submit(&mut self, store: &mut RecordStore, fields: R::Fields) -> Result<Submission> {
        let outcome = match self.state {
            SessionState::Idle => R::create(store, fields).map(Submission::Created),
            SessionState::Editing(id) => R::update(store, id, fields).map(|()| Submission::Updated(id)),
        };
        match &outcome {
            Ok(_) => self.reset(),
            // the edited record is gone; don't keep pointing at it
            Err(BudgetError::NotFound(_)) => self.reset(),
            Err(BudgetError::Validation(_)) => {}
        }
        outcome
    }

    /// Parses a flat field bag, then [`submit`](Self::submit)s it.
    pub fn submit_form(&mut self, store: &mut RecordStore, bag: &FieldBag) -> Result<Submission> {
        let fields = R::from_form(bag)?;
        self.submit(store, fields)
    }

    /// Form prefill for the record currently being edited.
    pub fn pending_form(&self, store: &RecordStore) -> Option<FieldBag> {
        let id = self.editing()?;
        R::load(store, id).map(|f| R::to_form(&f))
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Deletes `id`; ends the edit only if `id` is the record being edited.
    pub fn delete(&mut self, store: &mut RecordStore, id: RecordId) {
        R::delete(store, id);
        if self.state == SessionState::Editing(id) {
            self.reset();
        }
    }

    fn reset(&mut self) {
        if let SessionState::Editing(id) = self.state {
            debug!(kind = R::KIND, %id, "edit finished");
        }
        self.state = SessionState::Idle;
    }
}
