//! Forge runs against a scripted generator

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use specsmith_core::{Lifecycle, ProjectLayout, SpecError};
use specsmith_forge::{forge, ForgeError, ForgeOptions, ForgeOutcome, ForgeResult, GenerationRequest, SpecGenerator};
use specsmith_test_utils::TestProject;
use std::fs;

const GENERATED: &str = "---\nid: invoice-export\ntitle: Invoice Export\nstatus: active\ncreated: 2026-01-01\nupdated: 2026-01-01\npriority: medium\ntags: []\n---\n\n# Invoice Export\n\n## Phase 1: Plumbing [in-progress]\n\n- [ ] Add exporter \u{2190} current\n";

#[derive(Debug, Default)]
struct Scripted {
    reply: String,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl Scripted {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Mutex::default(),
        }
    }
}

#[async_trait]
impl SpecGenerator for Scripted {
    async fn generate(&self, request: &GenerationRequest) -> ForgeResult<String> {
        self.seen.lock().push(request.clone());
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn saved_spec_becomes_active() {
    let project = TestProject::new();
    project.engine.create("Existing Work", None).unwrap();
    let generator = Scripted::replying(GENERATED);

    let outcome = forge(&project.engine, &generator, "CSV export for invoices", &ForgeOptions::default())
        .await
        .unwrap();

    let ForgeOutcome::Saved { imported, .. } = outcome else {
        panic!("expected a saved spec");
    };
    assert_eq!(imported.id, "invoice-export");
    assert_eq!(project.read_spec("invoice-export"), GENERATED);
    assert_eq!(project.active().as_deref(), Some("invoice-export"));
    assert!(project.registry().contains("| invoice-export | Invoice Export |"));

    let seen = generator.seen.lock();
    assert_eq!(seen[0].description, "CSV export for invoices");
    assert_eq!(seen[0].today, "2026-01-01");
    assert!(seen[0].context.contains("## Existing Specs\n- existing-work"));
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let project = TestProject::new();
    let generator = Scripted::replying(GENERATED);
    let options = ForgeOptions {
        dry_run: true,
        ..ForgeOptions::default()
    };

    let outcome = forge(&project.engine, &generator, "anything", &options).await.unwrap();
    assert_eq!(outcome, ForgeOutcome::Preview { content: GENERATED.to_string() });
    assert!(!project.spec_path("invoice-export").exists());
    assert_eq!(project.active(), None);
}

#[tokio::test]
async fn include_files_reach_the_context() {
    let project = TestProject::new();
    fs::write(project.root().join("NOTES.md"), "remember the tax rules").unwrap();
    let generator = Scripted::replying("# no header\n");
    let options = ForgeOptions {
        includes: vec!["NOTES.md".into(), "missing.md".into()],
        dry_run: false,
    };

    let outcome = forge(&project.engine, &generator, "Tax Rules", &options).await.unwrap();
    let ForgeOutcome::Saved { imported, .. } = outcome else {
        panic!("expected a saved spec");
    };
    assert_eq!(imported.id, "tax-rules");

    let seen = generator.seen.lock();
    assert!(seen[0].context.contains("## NOTES.md\n```\nremember the tax rules\n```"));
    assert!(!seen[0].context.contains("missing.md\n```"));
}

#[tokio::test]
async fn uninitialized_project_fails_before_generating() {
    let tmp = tempfile::TempDir::new().unwrap();
    let engine = Lifecycle::new(ProjectLayout::new(tmp.path()));
    let generator = Scripted::replying(GENERATED);

    let err = forge(&engine, &generator, "x", &ForgeOptions::default()).await.unwrap_err();
    assert!(matches!(err, ForgeError::Spec(SpecError::NotInitialized { .. })));
    assert!(generator.seen.lock().is_empty());
}
