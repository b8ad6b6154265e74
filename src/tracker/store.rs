use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::utils::{
    clock::Clock,
    time::{shift_week_start, week_start},
};

use super::{
    model::{WeekState, WeekUpdate},
    storage::{WeekStorage, storage_key},
    transfer::{ImportError, parse_import},
};

/// Holds the week that is currently being looked at and keeps it in sync with [WeekStorage].
/// Persistence is best effort: a failed write is logged and the in-memory state is kept.
pub struct WeekStore<S: WeekStorage> {
    storage: S,
    clock: Box<dyn Clock>,
    active_week: NaiveDate,
    state: WeekState,
}

impl<S: WeekStorage> WeekStore<S> {
    /// Opens the store on the week containing `date`.
    pub async fn open(storage: S, clock: Box<dyn Clock>, date: NaiveDate) -> Self {
        let active_week = week_start(date);
        let state = load_or_create(&storage, clock.as_ref(), active_week).await;
        Self {
            storage,
            clock,
            active_week,
            state,
        }
    }

    pub fn active_week(&self) -> NaiveDate {
        self.active_week
    }

    pub fn state(&self) -> &WeekState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies `update` to the active week and persists the result before returning.
    #[instrument(skip(self))]
    pub async fn mutate(&mut self, update: WeekUpdate) -> bool {
        let applied = self.state.apply(update);
        if applied {
            self.persist().await;
        }
        applied
    }

    /// Moves the active week by `delta` weeks, loading or creating the target week. Fails without
    /// switching when the target is outside of the supported calendar.
    pub async fn shift_week(&mut self, delta: i64) -> anyhow::Result<NaiveDate> {
        let target = shift_week_start(self.active_week, delta).ok_or_else(|| {
            anyhow!(
                "Can't move {delta} weeks from {}, the date is out of range",
                self.active_week
            )
        })?;
        Ok(self.switch_to(target).await)
    }

    /// Switches to the week containing `date`.
    pub async fn switch_to(&mut self, date: NaiveDate) -> NaiveDate {
        let target = week_start(date);
        if target != self.active_week {
            self.state = load_or_create(&self.storage, self.clock.as_ref(), target).await;
            self.active_week = target;
            debug!("Switched to week {target}");
        }
        self.active_week
    }

    /// Replaces the active week with a fresh default. Nothing happens unless `confirmed`.
    pub async fn reset(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Reset of {} wasn't confirmed", self.active_week);
            return false;
        }
        self.state = WeekState::new_default(self.clock.time());
        self.persist().await;
        info!("Reset week {}", self.active_week);
        true
    }

    /// Installs `state`, usually an imported document, as the active week.
    pub async fn replace(&mut self, state: WeekState) {
        self.state = state.normalized();
        self.persist().await;
        info!("Replaced week {}", self.active_week);
    }

    /// Validates an exported document and installs it as the active week. A rejected document
    /// leaves both the active week and its stored record untouched.
    pub async fn import_document(&mut self, content: &str) -> Result<(), ImportError> {
        let state = parse_import(content)?;
        self.replace(state).await;
        Ok(())
    }

    async fn persist(&self) {
        if let Err(e) = save(&self.storage, self.active_week, &self.state).await {
            warn!("Failed to persist week {}: {e:?}", self.active_week);
        }
    }
}

async fn save(storage: &impl WeekStorage, week: NaiveDate, state: &WeekState) -> anyhow::Result<()> {
    let encoded = serde_json::to_string(state)?;
    storage.write(&storage_key(week), &encoded).await
}

/// What a storage key currently holds.
enum StoredWeek {
    Missing,
    /// Present but not decodable. Kept on disk so that it can still be recovered by hand.
    Corrupted,
    Found(WeekState),
}

async fn read_stored(storage: &impl WeekStorage, week: NaiveDate) -> anyhow::Result<StoredWeek> {
    let Some(raw) = storage.read(&storage_key(week)).await? else {
        return Ok(StoredWeek::Missing);
    };
    match serde_json::from_str::<WeekState>(&raw) {
        Ok(state) => Ok(StoredWeek::Found(state.normalized())),
        Err(e) => {
            warn!("Stored week {week} is corrupted: {e}");
            Ok(StoredWeek::Corrupted)
        }
    }
}

/// Reads a stored week. `Ok(None)` covers both a missing and an undecodable record, the latter is
/// logged.
pub async fn load_existing(
    storage: &impl WeekStorage,
    week: NaiveDate,
) -> anyhow::Result<Option<WeekState>> {
    match read_stored(storage, week).await? {
        StoredWeek::Found(state) => Ok(Some(state)),
        StoredWeek::Missing | StoredWeek::Corrupted => Ok(None),
    }
}

/// Returns the stored week or a new default one. Never fails. A freshly created week is persisted
/// right away so that its creation time stays stable. Records that exist but can't be read are
/// left alone until the user changes the week.
pub async fn load_or_create(
    storage: &impl WeekStorage,
    clock: &dyn Clock,
    week: NaiveDate,
) -> WeekState {
    let persist_default = match read_stored(storage, week).await {
        Ok(StoredWeek::Found(state)) => return state,
        Ok(StoredWeek::Missing) => true,
        Ok(StoredWeek::Corrupted) => false,
        Err(e) => {
            warn!("Failed to read week {week}: {e:?}");
            false
        }
    };

    let state = WeekState::new_default(clock.time());
    if persist_default {
        debug!("Creating week {week}");
        if let Err(e) = save(storage, week, &state).await {
            warn!("Failed to persist new week {week}: {e:?}");
        }
    }
    state
}
