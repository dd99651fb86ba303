//! Starting point for a newly created configuration

/// Minimal document written when no configuration exists yet
pub const NEW_CONFIG_TEMPLATE: &str = "\
# To get started with Dependabot version updates, you'll need to specify which
# package ecosystems to update and where the package manifests are located.
# Please see the documentation for all configuration options:
# https://docs.github.com/en/code-security/dependabot/dependabot-version-updates/configuration-options-for-the-dependabot.yml-file

version: 2
updates:
";
