//! Prompt text for spec generation

use specsmith_doc::CURRENT_MARKER;

/// System prompt describing the SPEC.md format
#[must_use]
pub fn system_prompt() -> String {
    format!(
        "\
You are SpecSmith, an expert at writing structured development specs.

From a description of what the user wants to build, produce a complete SPEC.md
in the SpecSmith format.

Rules:
- Output ONLY the SPEC.md content. No explanations, no markdown fences.
- Start with YAML frontmatter (---) and follow the format below exactly.
- Split the work into 2-5 phases of 3-7 concrete tasks each.
- Keep tasks specific and actionable, 30 minutes to 2 hours of work each.
- Include a Requirements section with lightweight acceptance criteria.
- Mark the first phase [in-progress] and the rest [pending].
- Mark the first task of the first phase with {CURRENT_MARKER}.
- Say in the Resume Context that the spec was just created.
- Use the project context to reference real files and patterns.

SPEC.md format:
---
id: <spec-id>
title: <Title>
status: active
created: <YYYY-MM-DD>
updated: <YYYY-MM-DD>
priority: medium
tags: []
---

# <Title>

## Overview

<2-4 sentences>

## Requirements

- <Acceptance criteria>

## Phase 1: <Name> [in-progress]

- [ ] <Task> {CURRENT_MARKER}
- [ ] <Task>

## Phase 2: <Name> [pending]

- [ ] <Task>

---

## Resume Context

> Spec just created. <Brief summary of starting point.>

## Decision Log

| Date | Decision | Rationale |
|------|----------|-----------|
"
    )
}

/// User turn for a generation request
#[must_use]
pub fn user_message(description: &str, today: &str, context: &str) -> String {
    format!("Create a spec for: {description}\n\nToday's date: {today}\n\nProject context:\n{context}")
}
