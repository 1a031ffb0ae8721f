use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use coin_core::SearchHistory;
use log::debug;

struct SessionEntry {
    history: SearchHistory,
    last_seen: Instant,
}

/// История поиска по сессиям. Ключ — id сессии, который присылает клиент.
///
/// Каждая сессия видит только свою историю; простаивающие сессии
/// выкидываются при следующем обращении к хранилищу.
pub(crate) struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub(crate) fn new(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity,
            idle_ttl,
        }
    }

    /// Запоминает запрос в истории сессии (создаёт сессию при необходимости)
    pub(crate) fn record(&self, session: &str, term: &str) -> bool {
        let now = Instant::now();
        let mut sessions = match self.sessions.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        };
        self.prune(&mut sessions, now);

        let entry = sessions
            .entry(session.to_string())
            .or_insert_with(|| SessionEntry {
                history: SearchHistory::with_capacity(self.capacity),
                last_seen: now,
            });
        entry.last_seen = now;
        entry.history.push(term)
    }

    /// Запросы сессии от старых к новым; неизвестная сессия — пустой список
    pub(crate) fn history(&self, session: &str) -> Vec<String> {
        let now = Instant::now();
        let mut sessions = match self.sessions.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.prune(&mut sessions, now);

        match sessions.get_mut(session) {
            Some(entry) => {
                entry.last_seen = now;
                entry.history.terms()
            }
            None => Vec::new(),
        }
    }

    fn prune(&self, sessions: &mut HashMap<String, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, e| now.duration_since(e.last_seen) <= self.idle_ttl);
        let dropped = before - sessions.len();
        if dropped > 0 {
            debug!("dropped {dropped} idle sessions");
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        match self.sessions.lock() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}
