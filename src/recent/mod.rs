use crate::color::Rgb;
use lru::LruCache;
use std::num::NonZeroUsize;

pub const RECENT_CAPACITY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Most-recently-seen colors, newest first.
#[derive(Debug, Clone)]
pub struct RecentColors {
    cache: LruCache<Rgb, ()>,
}

impl Default for RecentColors {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentColors {
    pub fn new() -> Self {
        Self {
            cache: LruCache::new(RECENT_CAPACITY),
        }
    }

    /// Restore from a newest-first list (the shape `to_vec` returns).
    /// Anything beyond capacity is dropped from the old end.
    pub fn from_list(colors: &[Rgb]) -> Self {
        let mut recent = Self::new();
        for &rgb in colors.iter().take(RECENT_CAPACITY.get()).rev() {
            recent.push(rgb);
        }
        recent
    }

    /// Move `rgb` to the front, inserting it if new and evicting the oldest
    /// entry when over capacity.
    pub fn push(&mut self, rgb: Rgb) {
        self.cache.put(rgb, ());
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.cache.iter().map(|(rgb, _)| *rgb)
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.iter().nth(index)
    }

    pub fn latest(&self) -> Option<Rgb> {
        self.get(0)
    }

    pub fn to_vec(&self) -> Vec<Rgb> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Rgb {
        Rgb::new(v, v, v)
    }

    #[test]
    fn test_newest_first() {
        let mut recent = RecentColors::new();
        recent.push(gray(1));
        recent.push(gray(2));
        recent.push(gray(3));
        assert_eq!(recent.to_vec(), vec![gray(3), gray(2), gray(1)]);
        assert_eq!(recent.latest(), Some(gray(3)));
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut recent = RecentColors::new();
        recent.push(gray(1));
        recent.push(gray(2));
        recent.push(gray(1));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.to_vec(), vec![gray(1), gray(2)]);
    }

    #[test]
    fn test_eleventh_evicts_oldest() {
        let mut recent = RecentColors::new();
        for v in 0..11 {
            recent.push(gray(v));
        }
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.latest(), Some(gray(10)));
        assert!(!recent.iter().any(|c| c == gray(0)));
        assert_eq!(recent.get(9), Some(gray(1)));
    }

    #[test]
    fn test_from_list_round_trip() {
        let mut recent = RecentColors::new();
        for v in [5, 6, 7] {
            recent.push(gray(v));
        }
        let restored = RecentColors::from_list(&recent.to_vec());
        assert_eq!(restored.to_vec(), recent.to_vec());
    }

    #[test]
    fn test_from_list_truncates() {
        let list: Vec<Rgb> = (0..15).map(gray).collect();
        let restored = RecentColors::from_list(&list);
        assert_eq!(restored.len(), 10);
        assert_eq!(restored.latest(), Some(gray(0)));
        assert_eq!(restored.get(9), Some(gray(9)));
    }
}
