use crate::areas::repository::Repository;
use crate::artifacts::log::history::History;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Display the first-parent chain from HEAD back to the root
    pub fn log(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.head_oid()?;
        let records = History::first_parent(self.database(), head_oid).collect::<Vec<_>>();

        for record in records {
            let (oid, commit) = record?;
            self.print_log_record(&oid, &commit)?;
        }

        Ok(())
    }

    /// Display every commit ever made, in unspecified order
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (oid, commit) in self.database().all_commits()? {
            self.print_log_record(&oid, &commit)?;
        }

        Ok(())
    }

    fn print_log_record(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {oid}")?;
        if commit.is_merge() {
            writeln!(
                writer,
                "Merge: {} {}",
                commit.parents()[0].to_short_oid(),
                commit.parents()[1].to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
