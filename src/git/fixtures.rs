//! Throwaway repositories for unit tests
//!
//! Commits are written straight into the object database from an in-memory
//! snapshot of flat file names, so no working tree is involved.

use super::GitRepo;
use git2::{Oid, Signature, Time};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

pub(crate) struct TestRepo {
    dir: TempDir,
    pub(crate) git: GitRepo,
    files: BTreeMap<String, Vec<u8>>,
    clock: i64,
}

impl TestRepo {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        Self {
            dir,
            git: GitRepo::from(repo),
            files: BTreeMap::new(),
            clock: 1_700_000_000,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn add(&mut self, name: &str, content: &str) -> Oid {
        self.add_all(&[(name, content)])
    }

    pub(crate) fn add_all(&mut self, files: &[(&str, &str)]) -> Oid {
        for (name, content) in files {
            self.files.insert(name.to_string(), content.as_bytes().to_vec());
        }
        self.commit_head("add files", &[])
    }

    pub(crate) fn add_binary(&mut self, name: &str, content: &[u8]) -> Oid {
        self.files.insert(name.to_string(), content.to_vec());
        self.commit_head("add binary", &[])
    }

    pub(crate) fn mv(&mut self, from: &str, to: &str) -> Oid {
        let content = self.files.remove(from).unwrap();
        self.files.insert(to.to_string(), content);
        self.commit_head(&format!("mv {from} {to}"), &[])
    }

    pub(crate) fn rm(&mut self, name: &str) -> Oid {
        self.files.remove(name).unwrap();
        self.commit_head(&format!("rm {name}"), &[])
    }

    /// Remove `removed` and write `files` in a single commit
    pub(crate) fn rewrite(&mut self, removed: &[&str], files: &[(&str, &str)]) -> Oid {
        for name in removed {
            self.files.remove(*name).unwrap();
        }
        for (name, content) in files {
            self.files.insert(name.to_string(), content.as_bytes().to_vec());
        }
        self.commit_head("rewrite", &[])
    }

    /// Commit the current snapshot unchanged
    pub(crate) fn empty_commit(&mut self) -> Oid {
        self.commit_head("empty", &[])
    }

    /// Commit `changes` on top of HEAD without moving HEAD, returning the new
    /// commit so it can be merged later
    pub(crate) fn side_commit(&mut self, changes: &[(&str, &str)]) -> Oid {
        let mut snapshot = self.files.clone();
        for (name, content) in changes {
            snapshot.insert(name.to_string(), content.as_bytes().to_vec());
        }
        let head = self.head();
        self.write_commit(None, "side", &snapshot, head.as_slice())
    }

    /// Merge `other` into HEAD, applying `changes` to the HEAD snapshot
    pub(crate) fn merge(&mut self, other: Oid, changes: &[(&str, &str)]) -> Oid {
        for (name, content) in changes {
            self.files.insert(name.to_string(), content.as_bytes().to_vec());
        }
        self.commit_head("merge", &[other])
    }

    fn head(&self) -> Option<Oid> {
        self.git
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
    }

    fn commit_head(&mut self, message: &str, extra_parents: &[Oid]) -> Oid {
        let mut parents: Vec<Oid> = self.head().into_iter().collect();
        parents.extend_from_slice(extra_parents);
        let snapshot = self.files.clone();
        self.write_commit(Some("HEAD"), message, &snapshot, &parents)
    }

    fn write_commit(
        &mut self,
        update_ref: Option<&str>,
        message: &str,
        snapshot: &BTreeMap<String, Vec<u8>>,
        parents: &[Oid],
    ) -> Oid {
        let repo = &self.git.repo;
        let mut builder = repo.treebuilder(None).unwrap();
        for (name, content) in snapshot {
            let blob = repo.blob(content).unwrap();
            builder.insert(name, blob, 0o100644).unwrap();
        }
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();

        self.clock += 60;
        let sig = Signature::new("Test Author", "test@example.com", &Time::new(self.clock, 0)).unwrap();
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }
}
