use crate::areas::repository::Repository;
use crate::artifacts::commit::Commit;
use crate::errors::{JotError, JotResult};

/// Render one commit the way `log` and `global-log` display it
fn render_commit(commit: &Commit) -> String {
    let mut block = String::new();

    block.push_str("===\n");
    block.push_str(&format!("commit {}\n", commit.id()));
    if let [first, second] = commit.parents() {
        block.push_str(&format!(
            "Merge: {} {}\n",
            first.to_short(),
            second.to_short()
        ));
    }
    block.push_str(&format!("Date: {}\n", commit.timestamp()));
    block.push_str(commit.message());
    block.push_str("\n\n");

    block
}

impl Repository {
    /// Display the active branch's history, newest first
    ///
    /// Walks first-parent ancestry from HEAD back to the initial commit;
    /// the second parent of a merge commit is shown only in its
    /// `Merge:` line.
    pub fn log(&self) -> JotResult<()> {
        let head = self.head_id().clone();
        let output = self
            .first_parent_history(&head)?
            .into_iter()
            .map(render_commit)
            .collect::<String>();

        println!("{output}");
        Ok(())
    }

    /// Display every commit ever made, in commit-id order
    pub fn global_log(&self) -> JotResult<()> {
        let output = self.all_commits().map(render_commit).collect::<String>();

        println!("{output}");
        Ok(())
    }

    /// Print the ids of all commits with exactly the given message
    pub fn find(&self, message: &str) -> JotResult<()> {
        let matches = self
            .all_commits()
            .filter(|commit| commit.message() == message)
            .map(|commit| commit.id().to_string())
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(JotError::NoMatchingCommit);
        }

        println!("{}", matches.join("\n"));
        Ok(())
    }
}
