//! Repository fixtures for integration tests
//!
//! Same API as the crate's unit-test fixture: each commit snapshots a flat set
//! of files straight into the object database and advances HEAD.

#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use gitsieve::GitRepo;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    dir: TempDir,
    pub git: GitRepo,
    files: BTreeMap<String, Vec<u8>>,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self {
            dir,
            git: GitRepo::from(repo),
            files: BTreeMap::new(),
            clock: 1_700_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add(&mut self, name: &str, content: &str) -> Oid {
        self.add_all(&[(name, content)])
    }

    pub fn add_all(&mut self, files: &[(&str, &str)]) -> Oid {
        self.rewrite(&[], files)
    }

    pub fn mv(&mut self, from: &str, to: &str) -> Oid {
        let content = self.files.remove(from).unwrap();
        self.files.insert(to.to_string(), content);
        self.commit(&format!("mv {from} {to}"))
    }

    pub fn rm(&mut self, name: &str) -> Oid {
        self.rewrite(&[name], &[])
    }

    /// Remove `removed` and write `files` in a single commit
    pub fn rewrite(&mut self, removed: &[&str], files: &[(&str, &str)]) -> Oid {
        for name in removed {
            self.files.remove(*name).unwrap();
        }
        for (name, content) in files {
            self.files.insert(name.to_string(), content.as_bytes().to_vec());
        }
        self.commit("rewrite")
    }

    fn commit(&mut self, message: &str) -> Oid {
        let repo = &self.git.repo;
        let mut builder = repo.treebuilder(None).unwrap();
        for (name, content) in &self.files {
            let blob = repo.blob(content).unwrap();
            builder.insert(name, blob, 0o100644).unwrap();
        }
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();

        self.clock += 60;
        let sig = Signature::new("Test Author", "test@example.com", &Time::new(self.clock, 0)).unwrap();
        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map(|oid| repo.find_commit(oid).unwrap());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }
}
