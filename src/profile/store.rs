use chrono::Utc;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStore;

use super::events::{EventBus, ProfileEvent, SubscriptionId};
use super::name::normalize_name;
use super::record::{ProfileBook, ProfileRecord};

pub const PROFILES_KEY: &str = "profiles data";
pub const CURRENT_PROFILE_KEY: &str = "current profile";

/// Named profiles plus the current-profile pointer, persisted through a
/// [`KeyValueStore`]. Every call reads storage afresh and writes it back.
#[derive(Debug)]
pub struct ProfileStore<S> {
    storage: S,
    events: EventBus,
    // Fallback chosen on open when persisting it failed.
    unsaved_current: Option<String>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Opens the store and repairs a missing or stale current-profile pointer
    /// by falling back to the first listed profile.
    pub fn open(storage: S) -> AppResult<Self> {
        let mut store = Self {
            storage,
            events: EventBus::default(),
            unsaved_current: None,
        };

        let current = store.initialize()?;
        tracing::info!(current = ?current, "profile store opened");
        Ok(store)
    }

    fn initialize(&mut self) -> AppResult<Option<String>> {
        let book = self.load_book()?;
        let pointer = self.stored_pointer()?;

        if let Some(name) = pointer.as_deref().filter(|name| book.contains(name)) {
            return Ok(Some(name.to_string()));
        }

        match book.first_name() {
            Some(first) => {
                tracing::debug!(stale = ?pointer, fallback = first, "repairing current profile");
                if let Err(err) = self.storage.set(CURRENT_PROFILE_KEY, first) {
                    tracing::warn!(error = %err, fallback = first, "could not persist current profile");
                    self.unsaved_current = Some(first.to_string());
                }
                Ok(Some(first.to_string()))
            }
            None => {
                if pointer.is_some() {
                    if let Err(err) = self.storage.remove(CURRENT_PROFILE_KEY) {
                        tracing::warn!(error = %err, "could not clear stale current profile");
                    }
                }
                Ok(None)
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ProfileEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn list_profile_names(&self) -> AppResult<Vec<String>> {
        Ok(self.load_book()?.names())
    }

    /// The current profile, or `None` when unset or naming a missing record.
    pub fn current_profile_name(&self) -> AppResult<Option<String>> {
        let book = self.load_book()?;
        if let Some(name) = self.stored_pointer()?.filter(|name| book.contains(name)) {
            return Ok(Some(name));
        }

        Ok(self
            .unsaved_current
            .clone()
            .filter(|name| book.contains(name)))
    }

    /// Moves the pointer without checking that `name` exists.
    pub fn set_current_profile_name(&mut self, name: Option<&str>) -> AppResult<()> {
        let previous = self.stored_pointer()?;

        match name {
            Some(name) => self.storage.set(CURRENT_PROFILE_KEY, name)?,
            None => self.storage.remove(CURRENT_PROFILE_KEY)?,
        }
        self.unsaved_current = None;
        tracing::info!(current = ?name, "current profile set");

        if previous.as_deref() != name {
            self.events.publish(&ProfileEvent::CurrentChanged {
                previous,
                current: name.map(str::to_string),
            });
        }

        Ok(())
    }

    pub fn switch_profile(&mut self, name: &str) -> AppResult<()> {
        if !self.load_book()?.contains(name) {
            return Err(AppError::ProfileNotFound(name.to_string()));
        }

        self.set_current_profile_name(Some(name))
    }

    /// Returns the trimmed name the profile was stored under.
    pub fn create_profile(&mut self, name: &str) -> AppResult<String> {
        let name = normalize_name(name)?;

        let mut book = self.load_book_for_write()?;
        if book.contains(&name) {
            return Err(AppError::ProfileExists(name));
        }

        book.insert(name.clone(), ProfileRecord::new(Utc::now()));
        self.save_book(&book)?;
        tracing::info!(profile = %name, "profile created");

        self.events.publish(&ProfileEvent::Created { name: name.clone() });
        Ok(name)
    }

    /// Returns whether the deleted profile was the current one.
    pub fn delete_profile(&mut self, name: &str) -> AppResult<bool> {
        let mut book = self.load_book_for_write()?;
        if book.remove(name).is_none() {
            tracing::warn!(profile = name, "profile not found for deletion");
            return Err(AppError::ProfileNotFound(name.to_string()));
        }

        self.save_book(&book)?;
        tracing::info!(profile = name, "profile deleted");

        let was_current = self.stored_pointer()?.as_deref() == Some(name)
            || self.unsaved_current.as_deref() == Some(name);
        self.events.publish(&ProfileEvent::Deleted {
            name: name.to_string(),
            was_current,
        });

        if was_current {
            self.set_current_profile_name(None)?;
        }

        Ok(was_current)
    }

    /// Looks up `name`, or the current profile when `name` is `None`.
    pub fn profile_data(&self, name: Option<&str>) -> AppResult<Option<ProfileRecord>> {
        let name = match name {
            Some(name) => name.to_string(),
            None => match self.current_profile_name()? {
                Some(current) => current,
                None => return Ok(None),
            },
        };

        let mut book = self.load_book()?;
        Ok(book.remove(&name))
    }

    pub fn current_profile_data(&self) -> AppResult<Option<ProfileRecord>> {
        self.profile_data(None)
    }

    pub fn save_profile_field(&mut self, name: &str, key: &str, value: Value) -> AppResult<()> {
        let mut book = self.load_book_for_write()?;
        let record = book.get_mut(name).ok_or_else(|| {
            tracing::error!(profile = name, key, "cannot save data: profile not found");
            AppError::ProfileNotFound(name.to_string())
        })?;

        record.set_field(key, value)?;
        self.save_book(&book)?;
        tracing::debug!(profile = name, key, "profile field saved");

        self.events.publish(&ProfileEvent::FieldSaved {
            name: name.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    pub fn save_current_profile_field(&mut self, key: &str, value: Value) -> AppResult<()> {
        let Some(current) = self.current_profile_name()? else {
            return Err(AppError::NoActiveProfile);
        };

        self.save_profile_field(&current, key, value)
    }

    fn stored_pointer(&self) -> AppResult<Option<String>> {
        self.storage.get(CURRENT_PROFILE_KEY)
    }

    /// Unreadable profiles read as empty.
    fn load_book(&self) -> AppResult<ProfileBook> {
        match self.load_book_for_write() {
            Err(AppError::UnreadableProfiles(err)) => {
                tracing::error!(error = %err, "stored profiles are unreadable, treating as empty");
                Ok(ProfileBook::default())
            }
            other => other,
        }
    }

    /// Unreadable profiles are an error, so a write never replaces them.
    fn load_book_for_write(&self) -> AppResult<ProfileBook> {
        let Some(raw) = self.storage.get(PROFILES_KEY)? else {
            return Ok(ProfileBook::default());
        };

        serde_json::from_str(&raw).map_err(AppError::UnreadableProfiles)
    }

    fn save_book(&mut self, book: &ProfileBook) -> AppResult<()> {
        let payload = serde_json::to_string(book)?;
        self.storage.set(PROFILES_KEY, &payload).inspect_err(|err| {
            tracing::error!(error = %err, "failed to save profiles");
        })
    }
}
