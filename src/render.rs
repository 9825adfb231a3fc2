//! Placeholder rendering and substitution-context assembly.
//!
//! Templates stay loop-free: anything depth-dependent (module nesting,
//! indentation, relative require paths) is computed here into plain
//! placeholder values before substitution.

use std::collections::HashMap;

use crate::error::ScaffoldError;

/// Description used until the user edits the generated stanza.
pub const DEFAULT_DESCRIPTION: &str = "Command description...";

/// Substitution context for one rendered artifact.
pub type Context = HashMap<&'static str, String>;

/// Replace every `{{name}}` in `body` with its context value.
///
/// A placeholder without a value is an error; leaving literal braces in
/// generated files would be silent corruption.
pub fn render(body: &str, context: &Context) -> Result<String, ScaffoldError> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            ScaffoldError::TemplateRender("unterminated placeholder".to_string())
        })?;
        let name = &after[..end];
        let value = context.get(name).ok_or_else(|| {
            ScaffoldError::TemplateRender(format!("no value for placeholder `{name}`"))
        })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

// =============================================================================
// Naming helpers
// =============================================================================

/// Application module constant: `newcli` -> `Newcli`.
pub fn module_name(app: &str) -> String {
    let mut chars = app.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Segment to class constant: `set` -> `Set`, `set-all` -> `SetAll`.
pub fn camelize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(module_name)
        .collect()
}

/// Fully qualified class constant: `Newcli::Commands::Config::Set`.
pub fn class_path(app: &str, segments: &[String]) -> String {
    let mut parts = vec![module_name(app), "Commands".to_string()];
    parts.extend(segments.iter().map(|s| camelize(s)));
    parts.join("::")
}

/// Load path for the generated class: `newcli/commands/config/set`.
pub fn require_path(app: &str, segments: &[String]) -> String {
    format!("{app}/commands/{}", segments.join("/"))
}

/// Built-in help invocation for a path: `newcli config help set`.
pub fn help_command(app: &str, segments: &[String]) -> String {
    let mut parts = vec![app.to_string()];
    parts.extend(segments[..segments.len() - 1].iter().cloned());
    parts.push("help".to_string());
    parts.push(segments[segments.len() - 1].clone());
    parts.join(" ")
}

// =============================================================================
// Class nesting
// =============================================================================

// Scope indents are two spaces per level: module, module Commands, then one
// class per path segment.

fn scope_open(app: &str, segments: &[String], superclass: &str) -> String {
    let mut lines = vec![
        format!("module {}", module_name(app)),
        "  module Commands".to_string(),
    ];
    for (i, segment) in segments.iter().enumerate() {
        let indent = " ".repeat(4 + 2 * i);
        if i + 1 == segments.len() {
            lines.push(format!("{indent}class {} < {superclass}", camelize(segment)));
        } else {
            lines.push(format!("{indent}class {}", camelize(segment)));
        }
    }
    lines.join("\n")
}

fn scope_close(depth: usize) -> String {
    let mut indents: Vec<usize> = vec![0, 2];
    indents.extend((0..depth).map(|i| 4 + 2 * i));
    indents
        .into_iter()
        .rev()
        .map(|i| format!("{}end", " ".repeat(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn body_indent(depth: usize) -> String {
    " ".repeat(2 * depth + 4)
}

// =============================================================================
// Per-artifact contexts
// =============================================================================

/// Context for a dispatcher class file.
pub fn dispatcher_context(app: &str, segments: &[String]) -> Context {
    let mut ctx = Context::new();
    ctx.insert("scope_open", scope_open(app, segments, "Thor"));
    ctx.insert("scope_close", scope_close(segments.len()));
    ctx.insert("body_indent", body_indent(segments.len()));
    ctx.insert("segment", segments[segments.len() - 1].clone());
    ctx
}

/// Context for a leaf class file.
pub fn subcommand_context(app: &str, segments: &[String]) -> Context {
    let superclass = format!("{}::Command", module_name(app));
    let mut ctx = Context::new();
    ctx.insert("scope_open", scope_open(app, segments, &superclass));
    ctx.insert("scope_close", scope_close(segments.len()));
    ctx.insert("body_indent", body_indent(segments.len()));
    ctx.insert("command_require", format!("{}command", "../".repeat(segments.len())));
    ctx
}

fn test_context(app: &str, segments: &[String]) -> Context {
    let help = help_command(app, segments);
    let mut ctx = Context::new();
    ctx.insert("app", app.to_string());
    ctx.insert("path", segments.join(" "));
    ctx.insert("segment", segments[segments.len() - 1].clone());
    ctx.insert("description", DEFAULT_DESCRIPTION.to_string());
    ctx.insert("require_path", require_path(app, segments));
    ctx.insert("class_path", class_path(app, segments));
    ctx.insert(
        "test_name",
        format!("executes_{}_command_successfully", help.replace(' ', "_")),
    );
    ctx.insert("help_command", help);
    ctx
}

/// Context for a dispatcher's integration help test.
pub fn command_test_context(app: &str, segments: &[String]) -> Context {
    test_context(app, segments)
}

/// Context for a leaf's integration help test.
pub fn subcommand_test_context(app: &str, segments: &[String]) -> Context {
    test_context(app, segments)
}

/// Context for a leaf's unit test.
pub fn unit_test_context(app: &str, segments: &[String]) -> Context {
    let mut ctx = test_context(app, segments);
    ctx.insert(
        "test_name",
        format!(
            "executes_{}_command_successfully",
            segments.join("_")
        ),
    );
    ctx
}

/// Context for a registration or delegation stanza spliced into the parent
/// of `child` (the registry when `child` is a top-level command).
pub fn stanza_context(app: &str, child: &[String]) -> Context {
    let parent_depth = child.len() - 1;
    let child_segment = child[child.len() - 1].clone();
    let require_relative = if parent_depth == 0 {
        format!("commands/{child_segment}")
    } else {
        format!("{}/{child_segment}", child[parent_depth - 1])
    };

    let mut ctx = Context::new();
    ctx.insert("indent", " ".repeat(2 * parent_depth + 4));
    ctx.insert("segment", child_segment);
    ctx.insert("description", DEFAULT_DESCRIPTION.to_string());
    ctx.insert("require_relative_path", require_relative);
    ctx.insert("class_path", class_path(app, child));
    ctx
}
