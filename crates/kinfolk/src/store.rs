//! The mutable family store.
//!
//! [`FamilyStore`] owns the current [`Family`] snapshot behind an [`Rc`].
//! Each mutation builds a new snapshot, swaps it in and then calls every
//! subscriber with the new snapshot, in subscription order. Readers holding
//! an older `Rc` keep seeing the old, consistent version.

use std::{fmt, rc::Rc};

use log::debug;

use kinfolk_core::family::{Family, FamilyError, Person, PersonIndex, Relation};

/// Handle returned by [`FamilyStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Subscriber = Box<dyn FnMut(&Rc<Family>)>;

/// Owner of the current family snapshot.
///
/// # Example
///
/// ```
/// # use std::{cell::Cell, rc::Rc};
/// # use kinfolk::store::FamilyStore;
/// # use kinfolk_core::family::Family;
/// let mut store = FamilyStore::new(Family::sample());
///
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// store.subscribe(move |family| counter.set(family.len()));
///
/// store.remove_person(8).unwrap();
/// assert_eq!(seen.get(), 8);
/// ```
pub struct FamilyStore {
    current: Rc<Family>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: usize,
}

impl FamilyStore {
    pub fn new(family: Family) -> Self {
        Self {
            current: Rc::new(family),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Rc<Family> {
        Rc::clone(&self.current)
    }

    /// Registers a callback invoked after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&Rc<Family>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscriber, _)| *subscriber != id);
        self.subscribers.len() != before
    }

    /// Appends a person.
    pub fn add_person(&mut self, person: Person) -> PersonIndex {
        let index = self.current.len();
        let next = self.current.with_person_added(person);
        self.replace(next);
        index
    }

    /// Replaces the person at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::PersonOutOfBounds`] and leaves the snapshot
    /// untouched if `index` does not exist.
    pub fn update_person(&mut self, index: PersonIndex, person: Person) -> Result<(), FamilyError> {
        let next = self.current.with_person_updated(index, person)?;
        self.replace(next);
        Ok(())
    }

    /// Removes the person at `index` together with the relations they are a
    /// partner in. Surviving indices above `index` shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::PersonOutOfBounds`] and leaves the snapshot
    /// untouched if `index` does not exist.
    pub fn remove_person(&mut self, index: PersonIndex) -> Result<(), FamilyError> {
        let next = self.current.with_person_removed(index)?;
        self.replace(next);
        Ok(())
    }

    /// Appends a relation.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::RelationOutOfBounds`] and leaves the snapshot
    /// untouched if the relation names a person that does not exist.
    pub fn add_relation(&mut self, relation: Relation) -> Result<(), FamilyError> {
        let next = self.current.with_relation_added(relation)?;
        self.replace(next);
        Ok(())
    }

    fn replace(&mut self, family: Family) {
        self.current = Rc::new(family);
        debug!(
            persons = self.current.len(),
            relations = self.current.relations().len(),
            subscribers = self.subscribers.len();
            "Family snapshot replaced"
        );
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.current);
        }
    }
}

impl Default for FamilyStore {
    fn default() -> Self {
        Self::new(Family::default())
    }
}

impl fmt::Debug for FamilyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyStore")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
