//! In-memory todo store.
//!
//! # Design
//! All state lives behind a single `RwLock`. Mutations hold the write lock
//! across the whole check-then-act sequence, so two concurrent inserts of
//! the same title cannot both pass the uniqueness check and two todos can
//! never receive the same id. Reads hold the read lock only long enough to
//! copy out a snapshot; callers never see a half-applied insert or delete.
//!
//! Todos are kept in a `BTreeMap` keyed by id. Ids only grow, so iteration
//! order is also insertion order, which is what the stable sorts in `list`
//! fall back to on ties. Titles are tracked in a separate index to keep the
//! uniqueness check O(1) and independent of how `Todo` compares.

use std::collections::{BTreeMap, HashSet};

use parking_lot::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::types::{Filter, NewTodo, SortKey, Status, Todo, TodoId};

#[derive(Debug)]
struct Inner {
    todos: BTreeMap<TodoId, Todo>,
    titles: HashSet<String>,
    next_id: i64,
}

/// Outcome of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    pub todo: Todo,
    /// Store size just before this todo was added.
    pub previous_len: usize,
}

/// Outcome of a list call, read under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub todos: Vec<Todo>,
    /// Store size at the moment the snapshot was taken, ignoring the filter.
    pub total: usize,
}

/// Shared, thread-safe owner of every todo.
#[derive(Debug)]
pub struct TodoStore<C = SystemClock> {
    clock: C,
    inner: RwLock<Inner>,
}

impl TodoStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TodoStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TodoStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                titles: HashSet::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new todo in `PENDING` state and return it along with the
    /// size the store had before the insert.
    ///
    /// A duplicate title is reported before a past due date. A due date equal
    /// to the current instant is accepted. Failed inserts do not consume an id.
    pub fn insert(&self, input: NewTodo) -> Result<Inserted, StoreError> {
        let mut inner = self.inner.write();
        if inner.titles.contains(&input.title) {
            return Err(StoreError::DuplicateTitle(input.title));
        }
        if input.due_date < self.clock.now_millis() {
            return Err(StoreError::PastDueDate);
        }

        let previous_len = inner.todos.len();
        let id = TodoId(inner.next_id);
        inner.next_id += 1;
        inner.titles.insert(input.title.clone());
        let todo = Todo::new(id, input);
        inner.todos.insert(id, todo.clone());
        Ok(Inserted { todo, previous_len })
    }

    pub fn count(&self, filter: Filter) -> usize {
        let inner = self.inner.read();
        match filter {
            Filter::All => inner.todos.len(),
            _ => inner.todos.values().filter(|t| filter.matches(t)).count(),
        }
    }

    /// Snapshot of the todos matching `filter`, ordered by `sort`.
    ///
    /// Sorting is stable: todos with equal keys keep their insertion order.
    pub fn list(&self, filter: Filter, sort: SortKey) -> Listing {
        let (mut todos, total): (Vec<Todo>, usize) = {
            let inner = self.inner.read();
            let todos = inner
                .todos
                .values()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect();
            (todos, inner.todos.len())
        };

        match sort {
            SortKey::Id => todos.sort_by_key(|t| t.id),
            SortKey::DueDate => todos.sort_by_key(|t| t.due_date),
            SortKey::Title => todos.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        Listing { todos, total }
    }

    /// Set the status of todo `id` and return the status it held before.
    ///
    /// The id is resolved before `status` is parsed, so an unknown id wins
    /// over an invalid status.
    pub fn update_status(&self, id: TodoId, status: &str) -> Result<Status, StoreError> {
        let mut inner = self.inner.write();
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let new_status: Status = status.parse()?;
        Ok(std::mem::replace(&mut todo.status, new_status))
    }

    /// Remove todo `id` and return how many todos remain.
    pub fn delete(&self, id: TodoId) -> Result<usize, StoreError> {
        let mut inner = self.inner.write();
        let todo = inner.todos.remove(&id).ok_or(StoreError::NotFound(id))?;
        inner.titles.remove(&todo.title);
        Ok(inner.todos.len())
    }

    pub fn get(&self, id: TodoId) -> Option<Todo> {
        self.inner.read().todos.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
