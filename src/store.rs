//! Best-score persistence: one float, keyed by name. Read once at startup,
//! written at most once per completed session.

/// localStorage key holding the persisted best.
pub const HIGH_SCORE_KEY: &str = "perfectCircleHighScore";

pub trait HighScoreStore {
    /// The persisted best, `0.0` when absent or unreadable.
    fn load(&self) -> f64;
    /// Persist a new best. Best-effort: failures are swallowed, the
    /// in-memory value the engine holds stays authoritative for the session.
    fn save(&mut self, value: f64);
}

/// In-memory store for native tests; records every save it receives.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: f64,
    pub saves: Vec<f64>,
}

impl MemoryStore {
    pub fn with_value(value: f64) -> Self {
        Self {
            value,
            saves: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> f64 {
        self.value
    }

    fn save(&mut self, value: f64) {
        self.value = value;
        self.saves.push(value);
    }
}

/// Browser store over `window.localStorage`. Anything missing along the way
/// (no window, storage disabled, unparsable value) degrades to the default.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> f64 {
        local_storage()
            .and_then(|s| s.get_item(HIGH_SCORE_KEY).ok().flatten())
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    fn save(&mut self, value: f64) {
        if let Some(s) = local_storage() {
            // Two decimals, matching the display format.
            s.set_item(HIGH_SCORE_KEY, &format!("{value:.2}")).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_records_saves() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), 0.0);
        store.save(87.5);
        assert_eq!(store.load(), 87.5);
        store.save(91.25);
        assert_eq!(store.saves, vec![87.5, 91.25]);
    }

    #[test]
    fn memory_store_can_start_seeded() {
        let store = MemoryStore::with_value(64.0);
        assert_eq!(store.load(), 64.0);
        assert!(store.saves.is_empty());
    }
}
