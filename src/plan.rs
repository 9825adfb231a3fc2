//! Action planning.
//!
//! The planner turns a command tree into one ordered batch of file actions.
//! Every node on the requested path gets its full artifact set, with each
//! artifact resolved against the filesystem: absent targets become `Create`,
//! present ones become `Skip` — planning never overwrites and never fails on
//! existing files. Registration stanzas are injected into the parent of each
//! new node; the root registry is only touched when the top-level command
//! itself is new.

use std::path::{Path, PathBuf};

use crate::anchor::Anchor;
use crate::error::ScaffoldError;
use crate::layout;
use crate::project::{FilesystemProbe, ProjectContext};
use crate::render::{self, Context};
use crate::templates::{self, TemplateKind};
use crate::tree::{CommandNode, CommandTree};

/// One planned filesystem mutation. Closed set; the executor matches
/// exhaustively.
#[derive(Debug)]
pub enum FileAction {
    Create {
        path: PathBuf,
        content: String,
    },
    Inject {
        path: PathBuf,
        anchor: Anchor,
        content: String,
        signature: String,
    },
    Skip {
        path: PathBuf,
        reason: String,
    },
}

impl FileAction {
    /// Target path, relative to the project root.
    pub fn path(&self) -> &Path {
        match self {
            FileAction::Create { path, .. }
            | FileAction::Inject { path, .. }
            | FileAction::Skip { path, .. } => path,
        }
    }
}

/// Ordered batch plus the artifacts that could not be rendered.
///
/// Render failures stay out of the action list so one broken artifact never
/// aborts the batch; the command surfaces them as `Failed` diagnostics.
#[derive(Debug)]
pub struct Plan {
    pub actions: Vec<FileAction>,
    pub failures: Vec<(PathBuf, ScaffoldError)>,
}

pub struct Planner<'a> {
    ctx: &'a ProjectContext,
    probe: &'a dyn FilesystemProbe,
}

impl<'a> Planner<'a> {
    pub fn new(ctx: &'a ProjectContext, probe: &'a dyn FilesystemProbe) -> Self {
        Self { ctx, probe }
    }

    /// Plan the whole batch for one invocation, in application order:
    /// integration tests, unit tests, command classes, asset markers, then
    /// injections (registry first, then dispatchers root to leaf).
    pub fn plan(&self, tree: &CommandTree) -> Plan {
        let mut plan = Plan {
            actions: Vec::new(),
            failures: Vec::new(),
        };
        let app = self.ctx.app_name.as_str();
        let framework = self.ctx.test_framework;
        let nodes = tree.nodes();
        let leaf = nodes.len() - 1;

        for (i, node) in nodes.iter().enumerate() {
            let (kind, context) = if i == leaf {
                (
                    TemplateKind::SubcommandTest,
                    render::subcommand_test_context(app, &node.path),
                )
            } else {
                (
                    TemplateKind::CommandTest,
                    render::command_test_context(app, &node.path),
                )
            };
            let target = layout::integration_test_file(framework, &node.path);
            self.plan_create(&mut plan, target, kind, &context);
        }

        let leaf_node = tree.leaf();
        self.plan_create(
            &mut plan,
            layout::unit_test_file(framework, &leaf_node.path),
            TemplateKind::SubcommandUnitTest,
            &render::unit_test_context(app, &leaf_node.path),
        );

        for (i, node) in nodes.iter().enumerate() {
            let (kind, context) = if i == leaf {
                (
                    TemplateKind::SubcommandClass,
                    render::subcommand_context(app, &node.path),
                )
            } else {
                (
                    TemplateKind::CommandClass,
                    render::dispatcher_context(app, &node.path),
                )
            };
            let target = layout::command_file(app, &node.path);
            self.plan_create(&mut plan, target, kind, &context);
        }

        self.plan_create(
            &mut plan,
            layout::asset_marker_file(app, &leaf_node.path),
            TemplateKind::AssetMarker,
            &Context::new(),
        );

        // Registration: the registry is edited only when the top-level
        // command itself is newly introduced.
        if !nodes[0].existing {
            self.plan_inject(
                &mut plan,
                layout::registry_file(app),
                Anchor::Registry,
                &nodes[0],
                leaf == 0,
            );
        }
        for i in 1..nodes.len() {
            if !nodes[i].existing {
                let parent = &nodes[nodes[i].parent.expect("non-root node has a parent")];
                self.plan_inject(
                    &mut plan,
                    layout::command_file(app, &parent.path),
                    Anchor::Dispatcher {
                        namespace: parent.segment.clone(),
                    },
                    &nodes[i],
                    i == leaf,
                );
            }
        }

        plan
    }

    fn plan_create(
        &self,
        plan: &mut Plan,
        target: PathBuf,
        kind: TemplateKind,
        context: &Context,
    ) {
        let body = templates::body(kind, self.ctx.test_framework);
        match render::render(body, context) {
            Ok(content) => {
                if self.probe.file_exists(&target) {
                    plan.actions.push(FileAction::Skip {
                        path: target,
                        reason: "already exists".to_string(),
                    });
                } else {
                    plan.actions.push(FileAction::Create {
                        path: target,
                        content,
                    });
                }
            }
            Err(err) => plan.failures.push((target, err)),
        }
    }

    fn plan_inject(
        &self,
        plan: &mut Plan,
        target: PathBuf,
        anchor: Anchor,
        child: &CommandNode,
        child_is_leaf: bool,
    ) {
        let app = self.ctx.app_name.as_str();
        // A leaf child is delegated to; a dispatcher child is registered.
        let (kind, signature) = if child_is_leaf {
            (
                TemplateKind::SubcommandStanza,
                format!("def {}(", child.segment),
            )
        } else {
            (
                TemplateKind::RegisterStanza,
                format!("register {},", render::class_path(app, &child.path)),
            )
        };

        let body = templates::body(kind, self.ctx.test_framework);
        match render::render(body, &render::stanza_context(app, &child.path)) {
            Ok(content) => plan.actions.push(FileAction::Inject {
                path: target,
                anchor,
                content,
                signature,
            }),
            Err(err) => plan.failures.push((target, err)),
        }
    }
}
