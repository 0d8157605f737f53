//! The user store
//!
//! Sole owner of the data file. Every operation reloads the collection
//! from disk; mutations run load-modify-store under the exclusive lock so
//! concurrent writers can never lose each other's changes.
//!
//! A data file that cannot be read counts as an empty collection. Reads
//! just log it; the next successful mutation moves the file aside to
//! `<file>.corrupt` and writes a fresh collection in its place.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::errors::{StoreError, StoreResult};
use super::file::CollectionFile;
use super::record::User;
use crate::identity::{IdGenerator, UuidGenerator};
use crate::schema::UserDraft;

/// File-backed user repository.
///
/// Reads hold the lock shared, create/update/delete hold it exclusive for
/// the whole load-modify-store sequence.
pub struct UserStore {
    file: CollectionFile,
    ids: Box<dyn IdGenerator>,
    lock: RwLock<()>,
}

impl UserStore {
    /// Opens a store over the given data file with UUID ids.
    ///
    /// The file is not created until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_id_generator(path, UuidGenerator)
    }

    /// Opens a store that draws ids from `ids`.
    pub fn with_id_generator(path: impl Into<PathBuf>, ids: impl IdGenerator + 'static) -> Self {
        Self {
            file: CollectionFile::new(path),
            ids: Box::new(ids),
            lock: RwLock::new(()),
        }
    }

    /// Returns the path of the data file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns every user in insertion order.
    ///
    /// Never fails: a missing or unreadable file reads as empty.
    pub fn list_all(&self) -> Vec<User> {
        let _guard = self.read_lock();
        self.load_for_read()
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no user has this id.
    pub fn get_by_id(&self, id: &str) -> StoreResult<User> {
        let _guard = self.read_lock();
        self.load_for_read()
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Creates a user with a fresh id.
    ///
    /// # Errors
    ///
    /// `Storage` if the collection cannot be persisted. The data file is
    /// unchanged in that case.
    pub fn create(&self, draft: UserDraft) -> StoreResult<User> {
        let _guard = self.write_lock();
        let (mut users, readable) = self.load_for_write();

        let user = User::from_draft(self.ids.new_id(), draft);
        users.push(user.clone());
        self.save(&users, readable)?;

        info!(id = %user.id, total = users.len(), "user created");
        Ok(user)
    }

    /// Replaces every field of a user except its id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no user has this id, the data file is not touched.
    pub fn update_by_id(&self, id: &str, draft: UserDraft) -> StoreResult<User> {
        let _guard = self.write_lock();
        let (mut users, readable) = self.load_for_write();

        let slot = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = User::from_draft(id, draft);
        let updated = slot.clone();

        self.save(&users, readable)?;

        info!(id = %updated.id, "user updated");
        Ok(updated)
    }

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// `NotFound` if no user has this id, the data file is not touched.
    pub fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock();
        let (mut users, readable) = self.load_for_write();

        let index = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        users.remove(index);

        self.save(&users, readable)?;

        info!(id = %id, total = users.len(), "user deleted");
        Ok(())
    }

    /// Reads the collection for a read-only operation, downgrading any
    /// failure to an empty collection.
    fn load_for_read(&self) -> Vec<User> {
        match self.file.load() {
            Ok(users) => {
                debug!(path = %self.path().display(), count = users.len(), "collection loaded");
                users
            }
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "data file unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Reads the collection for a mutation. The flag is false when the
    /// data file exists but could not be read.
    fn load_for_write(&self) -> (Vec<User>, bool) {
        match self.file.load() {
            Ok(users) => (users, true),
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "data file unreadable, starting from empty collection");
                (Vec::new(), false)
            }
        }
    }

    /// Persists a mutated collection, first moving an unreadable data
    /// file out of the way so its content survives.
    fn save(&self, users: &[User], readable: bool) -> StoreResult<()> {
        if !readable {
            let moved_to = self.file.quarantine()?;
            warn!(path = %self.path().display(), moved_to = %moved_to.display(), "unreadable data file moved aside");
        }
        self.file.persist(users)
    }

    // The guarded data lives on disk and is replaced atomically, so a
    // panic while holding the lock cannot leave it half written.
    fn read_lock(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("path", &self.file.path())
            .finish_non_exhaustive()
    }
}
