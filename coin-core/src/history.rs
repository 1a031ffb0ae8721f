use std::collections::VecDeque;

use crate::constants::HISTORY_CAPACITY;

/// Последние уникальные поисковые запросы.
/// Повтор не двигает запрос в конец; при переполнении выбрасывается самый старый.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    terms: VecDeque<String>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SearchHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            terms: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Добавляет запрос. Возвращает `false`, если такой уже есть.
    pub fn push(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() || self.terms.iter().any(|t| t == term) {
            return false;
        }

        self.terms.push_back(term.to_string());
        while self.terms.len() > self.capacity {
            self.terms.pop_front();
        }
        true
    }

    /// От самого старого к самому новому
    pub fn terms(&self) -> Vec<String> {
        self.terms.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
