//! Template store.
//!
//! Template bodies are embedded at compile time and keyed by artifact kind
//! plus test-framework variant. Only test artifacts vary with the framework;
//! command sources and injection stanzas are framework-invariant by
//! construction, so switching frameworks can never change generated command
//! files.

use crate::project::TestFramework;

/// Artifact kinds the renderer knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Dispatcher class routing to a namespace's subcommands.
    CommandClass,
    /// Leaf class delegating execution.
    SubcommandClass,
    /// Integration test for a dispatcher's built-in help.
    CommandTest,
    /// Integration test for a leaf's built-in help.
    SubcommandTest,
    /// Unit test for a leaf's default `execute`.
    SubcommandUnitTest,
    /// Empty marker establishing the template-assets directory.
    AssetMarker,
    /// Registration stanza for a dispatcher child.
    RegisterStanza,
    /// Delegation stanza for a leaf child.
    SubcommandStanza,
}

// =============================================================================
// Embedded Templates - command sources and stanzas (framework-invariant)
// =============================================================================

mod command_templates {
    pub const DISPATCHER: &str = include_str!("../resources/command/dispatcher.rb");
    pub const SUBCOMMAND: &str = include_str!("../resources/command/subcommand.rb");
    pub const REGISTER_STANZA: &str = include_str!("../resources/inject/register.rb");
    pub const SUBCOMMAND_STANZA: &str = include_str!("../resources/inject/subcommand.rb");
}

// =============================================================================
// Embedded Templates - test artifacts (per framework)
// =============================================================================

mod rspec_templates {
    pub const COMMAND_SPEC: &str = include_str!("../resources/rspec/command_spec.rb");
    pub const SUBCOMMAND_SPEC: &str = include_str!("../resources/rspec/subcommand_spec.rb");
    pub const UNIT_SPEC: &str = include_str!("../resources/rspec/unit_spec.rb");
}

mod minitest_templates {
    pub const COMMAND_TEST: &str = include_str!("../resources/minitest/command_test.rb");
    pub const SUBCOMMAND_TEST: &str = include_str!("../resources/minitest/subcommand_test.rb");
    pub const UNIT_TEST: &str = include_str!("../resources/minitest/unit_test.rb");
}

/// Look up the template body for an artifact kind under a framework.
pub fn body(kind: TemplateKind, framework: TestFramework) -> &'static str {
    use TemplateKind::*;
    use TestFramework::*;

    match (kind, framework) {
        (CommandClass, _) => command_templates::DISPATCHER,
        (SubcommandClass, _) => command_templates::SUBCOMMAND,
        (RegisterStanza, _) => command_templates::REGISTER_STANZA,
        (SubcommandStanza, _) => command_templates::SUBCOMMAND_STANZA,
        (AssetMarker, _) => "",
        (CommandTest, Rspec) => rspec_templates::COMMAND_SPEC,
        (CommandTest, Minitest) => minitest_templates::COMMAND_TEST,
        (SubcommandTest, Rspec) => rspec_templates::SUBCOMMAND_SPEC,
        (SubcommandTest, Minitest) => minitest_templates::SUBCOMMAND_TEST,
        (SubcommandUnitTest, Rspec) => rspec_templates::UNIT_SPEC,
        (SubcommandUnitTest, Minitest) => minitest_templates::UNIT_TEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_sources_are_framework_invariant() {
        for kind in [
            TemplateKind::CommandClass,
            TemplateKind::SubcommandClass,
            TemplateKind::RegisterStanza,
            TemplateKind::SubcommandStanza,
        ] {
            assert_eq!(
                body(kind, TestFramework::Rspec),
                body(kind, TestFramework::Minitest),
            );
        }
    }

    #[test]
    fn test_test_artifacts_vary_with_framework() {
        assert_ne!(
            body(TemplateKind::SubcommandUnitTest, TestFramework::Rspec),
            body(TemplateKind::SubcommandUnitTest, TestFramework::Minitest),
        );
    }

    #[test]
    fn test_asset_marker_is_empty() {
        assert!(body(TemplateKind::AssetMarker, TestFramework::Rspec).is_empty());
    }

    #[test]
    fn test_leaf_template_writes_ok_to_its_output_sink() {
        let leaf = body(TemplateKind::SubcommandClass, TestFramework::Rspec);
        assert!(leaf.contains("output.puts \"OK\""));
    }
}
