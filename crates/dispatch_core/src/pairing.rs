//! Positional chunking of incidents so consecutive incidents share one station.

use std::num::NonZeroUsize;

use crate::resources::Incident;

/// Incidents per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 2;

/// One group of consecutive incidents. `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
    pub index: usize,
    pub incidents: &'a [Incident],
}

impl<'a> Chunk<'a> {
    /// The incident whose location picks the chunk's station.
    pub fn leader(&self) -> &'a Incident {
        // Slices from `chunks` are never empty.
        &self.incidents[0]
    }
}

/// Splits an incident sequence into fixed-size chunks by position only:
/// `[0..size]`, `[size..2*size]`, ... The last chunk may be shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingScheduler {
    size: NonZeroUsize,
}

impl PairingScheduler {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn chunk<'a>(&self, incidents: &'a [Incident]) -> impl Iterator<Item = Chunk<'a>> + 'a {
        incidents
            .chunks(self.size.get())
            .enumerate()
            .map(|(i, incidents)| Chunk {
                index: i + 1,
                incidents,
            })
    }

    /// Number of chunks `incidents` will produce.
    pub fn chunk_count(&self, incidents: &[Incident]) -> usize {
        incidents.len().div_ceil(self.size.get())
    }
}

impl Default for PairingScheduler {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CHUNK_SIZE).expect("default chunk size is non-zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn incidents(n: usize) -> Vec<Incident> {
        (0..n)
            .map(|i| Incident::new(i, Coordinate::new(45.55 + i as f64 * 0.001, -73.58)))
            .collect()
    }

    fn ids(chunk: &Chunk<'_>) -> Vec<usize> {
        chunk.incidents.iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn pairs_by_position() {
        let list = incidents(5);
        let chunks: Vec<_> = PairingScheduler::default().chunk(&list).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(ids(&chunks[0]), vec![0, 1]);
        assert_eq!(ids(&chunks[1]), vec![2, 3]);
        assert_eq!(ids(&chunks[2]), vec![4]);
        assert_eq!(chunks[2].index, 3);
        assert_eq!(chunks[1].leader().id.0, 2);
    }

    #[test]
    fn chunk_count_rounds_up() {
        let scheduler = PairingScheduler::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(scheduler.chunk_count(&incidents(7)), 3);
        assert_eq!(scheduler.chunk_count(&incidents(0)), 0);
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert_eq!(PairingScheduler::default().chunk(&[]).count(), 0);
    }
}
