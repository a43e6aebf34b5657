//! Insertion-ordered object store.

use super::object::SceneObject;

/// Append-only list of scene objects, traversed in insertion order.
#[derive(Debug, Clone)]
pub struct SceneStore<T = SceneObject> {
    objects: Vec<T>,
}

impl<T> Default for SceneStore<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl<T> SceneStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, object: impl Into<T>) {
        self.objects.push(object.into());
    }

    pub fn for_each(&self, mut visitor: impl FnMut(&T)) {
        for object in &self.objects {
            visitor(object);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T, O: Into<T>> Extend<O> for SceneStore<T> {
    fn extend<I: IntoIterator<Item = O>>(&mut self, iter: I) {
        self.objects.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a, T> IntoIterator for &'a SceneStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut store = SceneStore::<u32>::new();
        store.append(3u32);
        store.append(1u32);
        store.extend([4u32, 1, 5]);

        let mut seen = Vec::new();
        store.for_each(|value| seen.push(*value));
        assert_eq!(seen, vec![3, 1, 4, 1, 5]);
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), seen);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn empty_store_visits_nothing() {
        let store = SceneStore::<SceneObject>::new();
        let mut visits = 0;
        store.for_each(|_| visits += 1);

        assert!(store.is_empty());
        assert_eq!(visits, 0);
    }
}
