//! Pre-parse optimizers.
//!
//! An optimizer shrinks markup without changing what it renders. It runs on
//! the raw source before normalization and is best-effort: callers fall back
//! to the unoptimized markup when it fails.

use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::ast::*;
use crate::error::IconError;
use crate::parse::parse_svg;
use crate::serialize::serialize;

pub trait Optimizer: Send + Sync {
    fn name(&self) -> &str;

    fn optimize(&self, svg: &str) -> Result<String, IconError>;
}

/// In-process cleanup of editor leftovers and invisible content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleanup;

impl Optimizer for Cleanup {
    fn name(&self) -> &str {
        "cleanup"
    }

    fn optimize(&self, svg: &str) -> Result<String, IconError> {
        let mut doc = parse_svg(svg)?;
        cleanup(&mut doc.root);
        Ok(serialize(&doc))
    }
}

/// Apply every cleanup pass to the subtree.
pub fn cleanup(root: &mut Element) {
    remove_metadata(root);
    remove_comments(root);
    remove_hidden(root);
    remove_empty(root);
    collapse_groups(root);
    remove_unused_namespaces(root);
}

/// Pipes markup through an external `svgo` binary.
#[derive(Debug, Clone)]
pub struct Svgo {
    pub program: String,
}

impl Default for Svgo {
    fn default() -> Self {
        Self {
            program: "svgo".into(),
        }
    }
}

impl Optimizer for Svgo {
    fn name(&self) -> &str {
        "svgo"
    }

    fn optimize(&self, svg: &str) -> Result<String, IconError> {
        let fail = |reason: String| IconError::Optimizer {
            name: self.program.clone(),
            reason,
        };

        let mut child = Command::new(&self.program)
            .args(["--input", "-", "--output", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| fail(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| fail("stdin unavailable".into()))?;
        let written = stdin.write_all(svg.as_bytes());
        drop(stdin);
        if let Err(e) = written {
            // Reap the child before reporting, it may have exited early
            let _ = child.wait();
            return Err(fail(format!("writing input: {e}")));
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(format!("{}: {}", output.status, stderr.trim())));
        }

        Ok(std::str::from_utf8(&output.stdout)?.to_string())
    }
}

fn is_editor_prefix(prefix: Option<&str>) -> bool {
    matches!(prefix, Some("sodipodi" | "inkscape"))
}

/// Remove metadata, title, desc, and editor-specific elements and attributes.
fn remove_metadata(elem: &mut Element) {
    let metadata_elements = ["metadata", "title", "desc"];

    elem.children.retain(|node| match node {
        Node::Element(e) => {
            !metadata_elements.contains(&e.name.local.as_str())
                && !is_editor_prefix(e.name.prefix.as_deref())
        }
        _ => true,
    });

    elem.attributes.retain(|attr| {
        !is_editor_prefix(attr.name.prefix.as_deref()) && attr.name.local != "data-name"
    });

    for child in elem.child_elements_mut() {
        remove_metadata(child);
    }
}

fn remove_comments(elem: &mut Element) {
    elem.children
        .retain(|node| !matches!(node, Node::Comment(_)));

    for child in elem.child_elements_mut() {
        remove_comments(child);
    }
}

/// Remove hidden elements (display:none, visibility:hidden, opacity:0).
fn remove_hidden(elem: &mut Element) {
    elem.children.retain(|node| match node {
        Node::Element(e) => !is_hidden(e),
        _ => true,
    });

    for child in elem.child_elements_mut() {
        remove_hidden(child);
    }
}

fn is_hidden(elem: &Element) -> bool {
    if elem.get_attr("display") == Some("none") {
        return true;
    }

    if elem.get_attr("visibility") == Some("hidden") {
        return true;
    }

    if let Some(opacity) = elem.get_attr("opacity")
        && opacity.trim().parse::<f64>().ok() == Some(0.0)
    {
        return true;
    }

    if let Some(style) = elem.get_attr("style")
        && (style.contains("display:none") || style.contains("display: none"))
    {
        return true;
    }

    false
}

/// Remove childless containers that nothing can reference.
fn remove_empty(elem: &mut Element) {
    for child in elem.child_elements_mut() {
        remove_empty(child);
    }

    let container_elements = [
        "g", "defs", "symbol", "marker", "clipPath", "mask", "pattern",
    ];

    elem.children.retain(|node| match node {
        Node::Element(e) if container_elements.contains(&e.name.local.as_str()) => {
            !e.children.is_empty() || e.get_attr("id").is_some()
        }
        _ => true,
    });
}

/// Replace single-child groups that carry no attributes with their child.
fn collapse_groups(elem: &mut Element) {
    for child in elem.child_elements_mut() {
        collapse_groups(child);
    }

    let mut new_children = Vec::with_capacity(elem.children.len());
    for child in std::mem::take(&mut elem.children) {
        match child {
            Node::Element(mut e) if can_collapse_group(&e) => {
                new_children.append(&mut e.children);
            }
            other => new_children.push(other),
        }
    }
    elem.children = new_children;
}

fn can_collapse_group(elem: &Element) -> bool {
    // Any attribute (fill, transform, id...) can change what the child renders.
    elem.is("g") && elem.attributes.is_empty() && elem.children.len() == 1
}

/// Drop `xmlns:prefix` declarations whose prefix is no longer used.
fn remove_unused_namespaces(root: &mut Element) {
    let mut used_prefixes: HashSet<String> = HashSet::new();
    collect_used_prefixes(root, &mut used_prefixes);

    root.attributes.retain(|attr| {
        attr.name.prefix.as_deref() != Some("xmlns") || used_prefixes.contains(&attr.name.local)
    });
}

fn collect_used_prefixes(elem: &Element, used: &mut HashSet<String>) {
    if let Some(prefix) = &elem.name.prefix {
        used.insert(prefix.clone());
    }

    for attr in &elem.attributes {
        if let Some(prefix) = &attr.name.prefix
            && !attr.name.is_xmlns()
        {
            used.insert(prefix.clone());
        }
    }

    for child in elem.child_elements() {
        collect_used_prefixes(child, used);
    }
}
