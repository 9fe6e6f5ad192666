// Open windows, owned by the application root

/// Windows keyed by id, kept in the order they were opened.
/// No dedup and no limit: every spawned window gets its own entry.
#[derive(Debug)]
pub struct WindowRegistry<K, T> {
    entries: Vec<(K, T)>,
}

impl<K: PartialEq + Copy, T> WindowRegistry<K, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, id: K, window: T) {
        self.entries.push((id, window));
    }

    pub fn remove(&mut self, id: K) -> Option<T> {
        let index = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == id)
            .map(|(_, w)| w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq + Copy, T> Default for WindowRegistry<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
