use crate::error::Result;
use crate::model::CommitEvent;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `user.email` as resolved through system, global and local config.
    pub fn user_email(&self) -> Option<String> {
        self.repo
            .config_snapshot()
            .string("user.email")
            .map(|email| email.to_string())
            .filter(|email| !email.trim().is_empty())
    }

    /// Author time and email of every commit reachable from HEAD, once each,
    /// in no particular order. Commits whose objects are missing end their
    /// branch of the walk instead of failing it.
    pub fn collect_events(&self, show_progress: bool) -> Result<Vec<CommitEvent>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            debug!("HEAD is unborn, no commits to collect");
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut events = Vec::new();
        let mut missing = 0usize;
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = if show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            // Shallow clones stop at the graft point; the parent object is absent.
            let commit = match self.repo.find_commit(commit_id) {
                Ok(commit) => commit,
                Err(e) => {
                    missing += 1;
                    debug!(%commit_id, "commit not readable, history ends here: {e}");
                    continue;
                }
            };
            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            let author = match commit.author() {
                Ok(author) => author,
                Err(e) => {
                    warn!(%commit_id, "unreadable author signature: {e}");
                    continue;
                }
            };
            let time = match author.time() {
                Ok(time) => time,
                Err(e) => {
                    warn!(%commit_id, "unreadable author time: {e}");
                    continue;
                }
            };

            events.push(CommitEvent::new(time.seconds, author.email.to_string()));
            pb.inc(1);
        }

        pb.finish_and_clear();
        if missing > 0 {
            warn!(missing, "history is incomplete, counting the commits that are present");
        }
        debug!(
            commits = events.len(),
            path = %self.path.display(),
            "collected commit events"
        );
        Ok(events)
    }
}
