// src/crawl/spawner.rs
// =============================================================================
// Running a growing tree of tasks on a fixed pool of worker threads.
//
// The parallel crawler only needs two things from a thread pool:
// 1. "Run this task, and let it spawn more tasks" (spawn)
// 2. "Wait until every task, including spawned ones, is done" (run)
//
// TaskSpawner and TaskScope capture exactly that, so the crawler does not
// care which pool is behind it. RayonSpawner is the implementation we ship.
//
// All tasks of one run() share a single scope. A task that spawns children
// returns right away instead of waiting for them, so a chain of thousands of
// pages never stacks thousands of waiting frames on one worker thread.
//
// Rust concepts:
// - Box<dyn FnOnce(..)>: A closure we can store in a Vec and call once
// - Lifetimes ('scope): Tasks may borrow data that lives only as long as
//   the run() call, so no Arc is needed for per-crawl state
// =============================================================================

use rayon::{Scope, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// A unit of work that may borrow from its spawner's scope and spawn more
/// work into it.
pub type Task<'scope> = Box<dyn FnOnce(&dyn TaskScope<'scope>) + Send + 'scope>;

/// Where a running task puts its children.
pub trait TaskScope<'scope> {
    fn spawn(&self, task: Task<'scope>);
}

/// Runs tasks on a worker pool and waits for all of them.
pub trait TaskSpawner: Send + Sync {
    /// Runs every root task and everything they spawn, transitively, and
    /// returns once all of it has finished.
    fn run<'scope>(&self, roots: Vec<Task<'scope>>);

    /// Number of worker threads behind this spawner.
    fn parallelism(&self) -> usize;
}

/// A [`TaskSpawner`] backed by a dedicated rayon thread pool.
pub struct RayonSpawner {
    pool: ThreadPool,
}

impl RayonSpawner {
    pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|index| format!("crawl-worker-{index}"))
            .build()?;

        Ok(Self { pool })
    }
}

impl<'scope> TaskScope<'scope> for Scope<'scope> {
    fn spawn(&self, task: Task<'scope>) {
        Scope::spawn(self, move |scope: &Scope<'scope>| task(scope as &dyn TaskScope<'scope>));
    }
}

impl TaskSpawner for RayonSpawner {
    fn run<'scope>(&self, roots: Vec<Task<'scope>>) {
        if roots.is_empty() {
            return;
        }

        // scope() only returns when every job spawned into it has finished
        self.pool.scope(|scope: &Scope<'scope>| {
            for task in roots {
                TaskScope::spawn(scope, task);
            }
        });
    }

    fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }
}
