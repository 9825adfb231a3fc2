//! Structural insertion anchors.
//!
//! Injection never works from line offsets. A small scanner pairs
//! `module`/`class`/`def` openers with their closing `end` by indentation,
//! remembers which class scope is the injection target, and returns the byte
//! offset of the line that closes it. Members can be reordered or added
//! above the boundary without moving the anchor.

use std::path::Path;

use crate::error::ScaffoldError;

/// Where an injection must land inside an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Closing boundary of the `CLI` class in the root registry file.
    Registry,
    /// Closing boundary of the dispatcher class declaring `namespace :<name>`.
    ///
    /// The marker doubles as a structure check: a leaf class file at the same
    /// path has no namespace declaration and therefore no anchor, which is
    /// how adding children to a leaf command is rejected.
    Dispatcher { namespace: String },
}

#[derive(PartialEq)]
enum Keyword {
    Module,
    Class,
    Def,
}

struct Scope {
    keyword: Keyword,
    indent: usize,
    target: bool,
}

/// Byte offset at which stanza content must be spliced, i.e. the start of
/// the line closing the anchored class scope. `None` when the file lacks the
/// expected structure.
pub fn insertion_offset(content: &str, anchor: &Anchor) -> Option<usize> {
    let namespace_marker = match anchor {
        Anchor::Registry => None,
        Anchor::Dispatcher { namespace } => Some(format!("namespace :{namespace}")),
    };

    let mut stack: Vec<Scope> = Vec::new();
    let mut offset = 0usize;

    for line in content.split_inclusive('\n') {
        let stripped = line.trim_start_matches(' ');
        let indent = line.len() - stripped.len();
        let stmt = stripped.trim_end();

        if stmt == "end" {
            if stack.last().is_some_and(|scope| scope.indent == indent) {
                let scope = stack.pop().expect("checked non-empty");
                if scope.target {
                    return Some(offset);
                }
            }
        } else if let Some(keyword) = opener(stmt) {
            // The registry target is the class named CLI; a dispatcher target
            // is marked later, when its namespace declaration is seen.
            let target = keyword == Keyword::Class
                && namespace_marker.is_none()
                && (stmt == "class CLI" || stmt.starts_with("class CLI "));
            stack.push(Scope {
                keyword,
                indent,
                target,
            });
        } else if namespace_marker.as_deref() == Some(stmt) {
            if let Some(scope) = stack
                .iter_mut()
                .rev()
                .find(|scope| scope.keyword == Keyword::Class)
            {
                scope.target = true;
            }
        }

        offset += line.len();
    }

    None
}

/// Render an anchor-not-found failure for a target file.
pub fn not_found(path: &Path, anchor: &Anchor) -> ScaffoldError {
    let detail = match anchor {
        Anchor::Registry => "no registry class boundary".to_string(),
        Anchor::Dispatcher { namespace } => {
            format!("no dispatcher class declaring `namespace :{namespace}`")
        }
    };
    ScaffoldError::AnchorNotFound {
        path: path.to_path_buf(),
        detail,
    }
}

fn opener(stmt: &str) -> Option<Keyword> {
    if stmt.starts_with("module ") {
        Some(Keyword::Module)
    } else if stmt.starts_with("class ") {
        Some(Keyword::Class)
    } else if stmt.starts_with("def ") {
        Some(Keyword::Def)
    } else {
        None
    }
}
