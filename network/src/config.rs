use std::num::NonZeroUsize;

/// Immutable execution knobs for a batched forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardConfig {
    parallel: bool,
    min_rows_per_task: NonZeroUsize,
}

impl ForwardConfig {
    /// Creates a new forward configuration.
    ///
    /// # Args
    /// * `parallel` - Whether the batch rows are evaluated on the rayon thread pool.
    /// * `min_rows_per_task` - The smallest contiguous range of rows a single task gets.
    ///
    /// # Returns
    /// A `ForwardConfig` instance.
    pub fn new(parallel: bool, min_rows_per_task: NonZeroUsize) -> Self {
        Self {
            parallel,
            min_rows_per_task,
        }
    }

    /// Returns a configuration that evaluates every row on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn min_rows_per_task(&self) -> usize {
        self.min_rows_per_task.get()
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_rows_per_task: NonZeroUsize::MIN,
        }
    }
}
