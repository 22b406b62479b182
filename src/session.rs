use crate::metrics::Grain;

/// Ordered, undoable collection of the grains confirmed on one image.
///
/// A session belongs to a single image; opening another image starts a new one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    grains: Vec<Grain>,
}

/// Observable state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    NonEmpty,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grain at the end. Always succeeds.
    pub fn append(&mut self, grain: Grain) {
        self.grains.push(grain);
    }

    /// Removes and returns the newest grain.
    ///
    /// `None` means there was nothing to undo; the session stays empty.
    pub fn remove_last(&mut self) -> Option<Grain> {
        self.grains.pop()
    }

    /// Grains in insertion order.
    pub fn all(&self) -> &[Grain] {
        &self.grains
    }

    pub fn last(&self) -> Option<&Grain> {
        self.grains.last()
    }

    pub fn len(&self) -> usize {
        self.grains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grains.is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.grains.is_empty() {
            SessionState::Empty
        } else {
            SessionState::NonEmpty
        }
    }

    /// Mean sphericity of the session's grains, `None` when empty.
    pub fn mean_sphericity(&self) -> Option<f64> {
        if self.grains.is_empty() {
            return None;
        }
        let sum: f64 = self.grains.iter().map(|g| g.sphericity).sum();
        Some(sum / self.grains.len() as f64)
    }
}
