use crate::areas::repository::Repository;
use crate::errors::LitError;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits with exactly the given message
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut found = false;
        for (oid, commit) in self.database().all_commits()? {
            if commit.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if found {
            Ok(())
        } else {
            Err(LitError::NoCommitWithMessage.into())
        }
    }
}
