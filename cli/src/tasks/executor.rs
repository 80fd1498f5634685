//! # Resilient Task Executor
//!
//! File: cli/src/tasks/executor.rs
//!
//! `execute_task` is the only place that knows how each task kind is carried
//! out. Filesystem tasks use `common::fs`; process tasks go through the
//! supplied `CommandRunner`.
//!
use crate::common::fs::{copy, io, links};
use crate::common::process::CommandRunner;
use crate::core::error::Result;
use crate::tasks::Task;
use tracing::info;

/// Performs a single task.
///
/// # Errors
///
/// Propagates the failure of the underlying filesystem operation or process.
pub fn execute_task(task: &Task, runner: &dyn CommandRunner) -> Result<()> {
    match task {
        Task::RunProcess(spec) => runner.run(spec),
        Task::CopyPath { source, target } => copy::copy_path(source, target),
        Task::MirrorTree { source, target } => copy::mirror_tree(source, target).map(|_| ()),
        Task::ReplaceInFile { path, from, to } => io::replace_in_file(path, from, to).map(|_| ()),
        Task::RemovePath { path } => io::remove_path(path),
        Task::SetPermissions {
            dir,
            name_contains,
            mode,
        } => io::set_mode_matching(dir, name_contains, *mode).map(|_| ()),
        Task::Symlink { source, target } => links::create_symlink(source, target),
        Task::Narrate(message) => {
            info!("{}", message);
            println!(" [resilient] {}", message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::RecordingRunner;
    use crate::common::process::ProcessSpec;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_task_uses_runner() {
        let runner = RecordingRunner::default();
        let task: Task = ProcessSpec::new("composer").arg("install").into();
        execute_task(&task, &runner).unwrap();
        assert_eq!(*runner.calls.borrow(), vec!["composer install".to_string()]);
    }

    #[test]
    fn test_filesystem_tasks() -> Result<()> {
        let dir = tempdir()?;
        let runner = RecordingRunner::default();
        let source = dir.path().join("composer.extra.json");
        let target = dir.path().join("project/composer.extra.json");
        fs::write(&source, r#"{"require": "[jira_code]"}"#)?;

        execute_task(&Task::copy(&source, &target), &runner)?;
        execute_task(&Task::replace(&target, "[jira_code]", "ACME"), &runner)?;
        assert_eq!(fs::read_to_string(&target)?, r#"{"require": "ACME"}"#);

        execute_task(&Task::remove(&target), &runner)?;
        assert!(!target.exists());
        assert!(runner.calls.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_replace_task_on_missing_file_fails() {
        let dir = tempdir().unwrap();
        let task = Task::replace(dir.path().join("settings.php"), "# }", "}");
        assert!(execute_task(&task, &RecordingRunner::default()).is_err());
    }
}
