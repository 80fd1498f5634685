//! # Resilient Task Collection Builder
//!
//! File: cli/src/tasks/builder.rs
//!
//! ## Overview
//!
//! `TaskCollectionBuilder` accumulates tasks in the order they are appended
//! and later runs them strictly in that order.
//!
//! ## Execution Policy
//!
//! - Fail fast: the first failing task aborts the run; later tasks never start.
//! - No rollback: tasks that already ran (including database resets) stay done.
//! - No retries at any level.
//!
//! `execute` takes the builder by value, so nothing can be appended once a
//! run has started.
//!
use crate::common::process::CommandRunner;
use crate::core::error::{ResilientError, Result};
use crate::tasks::executor::execute_task;
use crate::tasks::Task;
use anyhow::anyhow;
use tracing::{debug, error, info};

/// Ordered collection of tasks for one command invocation.
#[derive(Debug, Default, Clone)]
pub struct TaskCollectionBuilder {
    tasks: Vec<Task>,
}

impl TaskCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task to the tail of the collection.
    pub fn append(&mut self, task: impl Into<Task>) -> &mut Self {
        self.tasks.push(task.into());
        self
    }

    /// Adds every task of `tasks`, keeping their order.
    pub fn append_all<I>(&mut self, tasks: I) -> &mut Self
    where
        I: IntoIterator<Item = Task>,
    {
        self.tasks.extend(tasks);
        self
    }

    /// Adds a step that only prints `message` when reached.
    pub fn add_narration(&mut self, message: impl Into<String>) -> &mut Self {
        self.append(Task::narrate(message))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Numbered, human-readable listing of the collection (dry runs).
    pub fn describe(&self) -> Vec<String> {
        let width = self.tasks.len().to_string().len();
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| format!("{:>width$}. {}", i + 1, task, width = width))
            .collect()
    }

    /// # Execute Collection (`execute`)
    ///
    /// Runs every task in append order.
    ///
    /// ## Returns
    ///
    /// * `Ok(n)` - All `n` tasks succeeded.
    /// * `Err` - `ResilientError::TaskExecution` for the first task that
    ///   failed, with its position, description and cause. Remaining tasks are
    ///   skipped.
    pub fn execute(self, runner: &dyn CommandRunner) -> Result<usize> {
        if self.is_empty() {
            debug!("No tasks to execute.");
            return Ok(0);
        }
        let total = self.tasks.len();
        info!("Executing {} task(s)...", total);
        for (index, task) in self.tasks.iter().enumerate() {
            let position = index + 1;
            debug!("[{}/{}] {}", position, total, task);
            if let Err(e) = execute_task(task, runner) {
                error!("Task {}/{} failed: {:#}", position, total, e);
                return Err(anyhow!(ResilientError::TaskExecution {
                    position,
                    total,
                    task: task.to_string(),
                    message: format!("{:#}", e),
                }));
            }
        }
        info!("All {} task(s) completed.", total);
        Ok(total)
    }
}
