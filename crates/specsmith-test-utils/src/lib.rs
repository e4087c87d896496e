//! Testing utilities for the specsmith workspace
//!
//! Shared fixtures and a throwaway project with a controllable clock.

#![allow(missing_docs)]

use chrono::NaiveDate;
use specsmith_core::{Lifecycle, ManualClock, ProjectLayout};
use specsmith_doc::SpecDocument;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A spec two-thirds of the way through its second phase
pub const SAMPLE_SPEC: &str = "---
id: test-spec
title: Test Spec
status: active
created: 2026-01-15
updated: 2026-01-20
priority: high
tags: [auth, backend]
---

# Test Spec

## Overview

Test spec for unit tests.

## Phase 1: Setup [completed]

- [x] Task A
- [x] Task B

## Phase 2: Implementation [in-progress]

- [x] Task C
- [ ] Task D \u{2190} current
- [ ] Task E

## Phase 3: Polish [pending]

- [ ] Task F

---

## Resume Context

> Working on Task D. File is src/foo.ts.

## Decision Log

| Date | Decision | Rationale |
|------|----------|-----------|
| 2026-01-15 | Use JWT | Stateless |
";

/// Date the test clock starts at
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

/// Minimal document with the given tasks in a single phase
pub fn spec_with_tasks(id: &str, status: &str, tasks: &[(&str, bool)]) -> String {
    let mut doc = format!(
        "---\nid: {id}\ntitle: {id}\nstatus: {status}\ncreated: 2026-01-01\nupdated: 2026-01-01\npriority: medium\n---\n\n# {id}\n\n## Phase 1: Work [in-progress]\n\n"
    );
    for (description, done) in tasks {
        let mark = if *done { "x" } else { " " };
        doc.push_str(&format!("- [{mark}] {description}\n"));
    }
    doc.push_str("\n## Resume Context\n\n> Nothing yet.\n");
    doc
}

/// Initialized project in a temp directory with a manual clock
pub struct TestProject {
    pub dir: TempDir,
    pub clock: Arc<ManualClock>,
    pub engine: Lifecycle,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let layout = ProjectLayout::new(dir.path());
        layout.init().unwrap();
        let clock = Arc::new(ManualClock::new(start_date()));
        let engine = Lifecycle::new(layout).with_clock(clock.clone());
        Self { dir, clock, engine }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> &ProjectLayout {
        self.engine.layout()
    }

    pub fn spec_path(&self, id: &str) -> PathBuf {
        self.layout().spec_path(id)
    }

    /// Write a document directly, bypassing the engine
    pub fn write_spec(&self, id: &str, content: &str) {
        let path = self.spec_path(id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read_spec(&self, id: &str) -> String {
        fs::read_to_string(self.spec_path(id)).unwrap()
    }

    pub fn document(&self, id: &str) -> SpecDocument {
        SpecDocument::parse(&self.read_spec(id))
    }

    pub fn status_of(&self, id: &str) -> String {
        self.document(id).status_raw().unwrap_or_default()
    }

    pub fn updated_of(&self, id: &str) -> String {
        self.document(id).metadata().get_str("updated").unwrap_or_default()
    }

    pub fn set_active(&self, id: &str) {
        fs::write(self.layout().active_path(), id).unwrap();
    }

    pub fn active(&self) -> Option<String> {
        self.engine.active().unwrap()
    }

    pub fn registry(&self) -> String {
        fs::read_to_string(self.layout().registry_path()).unwrap()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
