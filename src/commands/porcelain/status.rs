use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Display all branches (current one starred) and pending changes
    pub fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let current_branch = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;

        let mut index = self.index();
        index.rehydrate()?;

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in branches {
            if branch == current_branch {
                writeln!(writer, "*{branch}")?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }

        writeln!(writer, "\n=== Staged Files ===")?;
        for name in index.added().keys() {
            writeln!(writer, "{name}")?;
        }

        writeln!(writer, "\n=== Removed Files ===")?;
        for name in index.removed() {
            writeln!(writer, "{name}")?;
        }

        // trailer sections, always printed empty
        writeln!(writer, "\n=== Modifications Not Staged For Commit ===")?;
        writeln!(writer, "\n=== Untracked Files ===\n")?;

        Ok(())
    }
}
