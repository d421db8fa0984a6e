//! Per-level progress callbacks for [`SubdivisionMesh`](crate::algo::subdivide::SubdivisionMesh).
//!
//! Building a deep hierarchy is dominated by its last level, which has four
//! times the faces of the one before it. A [`Progress`] hears about every
//! level as it starts and once more when the hierarchy is complete.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use symsubdiv::algo::Progress;
//! use symsubdiv::algo::subdivide::{SubdivideOptions, SubdivisionMesh};
//! use symsubdiv::mesh::shapes;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let progress = Progress::new(move |done, total, _| {
//!     sink.lock().unwrap().push((done, total));
//! });
//!
//! SubdivisionMesh::with_progress(shapes::cube(), &SubdivideOptions::new(2), &progress).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![(0, 2), (1, 2), (2, 2)]);
//! ```

type Callback = dyn Fn(usize, usize, &str) + Send + Sync;

/// Receives `(levels_done, levels_total, message)` while levels are built.
pub struct Progress {
    callback: Box<Callback>,
}

impl Progress {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Forward one update to the callback.
    #[inline]
    pub fn report(&self, done: usize, total: usize, message: &str) {
        (self.callback)(done, total, message);
    }

    /// Announce that level `level` (1-based, counted from the control mesh)
    /// is about to be built, `done` of `total` new levels being finished.
    pub(crate) fn level_started(&self, done: usize, total: usize, level: usize) {
        self.report(done, total, &format!("building level {level}"));
    }

    /// Announce that all `total` new levels exist.
    pub(crate) fn finished(&self, total: usize) {
        self.report(total, total, "subdivision complete");
    }

    /// Ignore every update.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_level_messages() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let progress = Progress::new(move |done, total, message| {
            sink.lock().unwrap().push(format!("{done}/{total} {message}"));
        });

        progress.level_started(0, 2, 3);
        progress.finished(2);
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["0/2 building level 3", "2/2 subdivision complete"]
        );
    }
}
