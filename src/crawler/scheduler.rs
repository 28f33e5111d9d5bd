//! Frontier management for the crawl
//!
//! The crawl is a depth-first traversal driven by an explicit LIFO stack of
//! tasks instead of recursion, so very deep or wide sites cannot exhaust the
//! call stack. Children are pushed in reverse so the first link on a page is
//! processed first, giving the same pre-order as a recursive descent.

/// One step of the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// The URL to check
    pub target: String,

    /// The page `target` was discovered on
    pub source: String,

    /// Hops left before the traversal frontier
    pub remaining_depth: u32,
}

impl CrawlTask {
    /// Creates the task for the seed page, which is its own source
    pub fn seed(url: &str, depth: u32) -> Self {
        Self {
            target: url.to_string(),
            source: url.to_string(),
            remaining_depth: depth,
        }
    }

    /// Builds the tasks for links found on this task's page
    ///
    /// Children get one hop less; a task already at the frontier has none.
    pub fn children(&self, links: Vec<String>) -> Vec<CrawlTask> {
        let Some(remaining_depth) = self.remaining_depth.checked_sub(1) else {
            return Vec::new();
        };

        links
            .into_iter()
            .map(|target| CrawlTask {
                target,
                source: self.target.clone(),
                remaining_depth,
            })
            .collect()
    }
}

/// LIFO work stack of pending tasks
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<CrawlTask>,
}

impl Frontier {
    /// Creates a frontier holding a single task
    pub fn new(seed: CrawlTask) -> Self {
        Self { stack: vec![seed] }
    }

    /// Takes the next task to process
    pub fn next_task(&mut self) -> Option<CrawlTask> {
        self.stack.pop()
    }

    /// Adds the children of a processed page
    ///
    /// Pushed in reverse so they pop in document order.
    pub fn push_children(&mut self, children: Vec<CrawlTask>) {
        self.stack.extend(children.into_iter().rev());
    }

    /// Returns the number of pending tasks
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
