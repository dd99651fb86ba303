//! Well-known manifest filenames and the ecosystems they imply
//!
//! Exact filenames are looked up first; names with a variable stem
//! (`App.csproj`, `my_gem.gemspec`) are matched by suffix.
//!
//! See <https://docs.github.com/en/code-security/dependabot/dependabot-version-updates/configuration-options-for-the-dependabot.yml-file#package-ecosystem>

use crate::domain::Ecosystem;

/// Conventional directory whose presence implies GitHub Actions workflows
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Exact filename matches
const FILES: &[(&str, Ecosystem)] = &[
    ("Gemfile", Ecosystem::Bundler),
    ("Gemfile.lock", Ecosystem::Bundler),
    ("Cargo.toml", Ecosystem::Cargo),
    ("Cargo.lock", Ecosystem::Cargo),
    ("composer.json", Ecosystem::Composer),
    ("composer.lock", Ecosystem::Composer),
    ("Dockerfile", Ecosystem::Docker),
    ("elm-package.json", Ecosystem::Elm),
    ("elm.json", Ecosystem::Elm),
    (".gitmodules", Ecosystem::Gitsubmodule),
    ("go.mod", Ecosystem::Gomod),
    ("go.sum", Ecosystem::Gomod),
    ("build.gradle", Ecosystem::Gradle),
    ("build.gradle.kts", Ecosystem::Gradle),
    ("pom.xml", Ecosystem::Maven),
    ("mix.exs", Ecosystem::Mix),
    ("mix.lock", Ecosystem::Mix),
    ("package.json", Ecosystem::Npm),
    ("package-lock.json", Ecosystem::Npm),
    ("npm-shrinkwrap.json", Ecosystem::Npm),
    ("yarn.lock", Ecosystem::Npm),
    ("pnpm-lock.yaml", Ecosystem::Npm),
    ("packages.config", Ecosystem::Nuget),
    ("requirements.txt", Ecosystem::Pip),
    ("Pipfile", Ecosystem::Pip),
    ("Pipfile.lock", Ecosystem::Pip),
    ("setup.py", Ecosystem::Pip),
    ("pyproject.toml", Ecosystem::Pip),
    ("poetry.lock", Ecosystem::Pip),
    ("pubspec.yaml", Ecosystem::Pub),
    ("Package.swift", Ecosystem::Swift),
    (".terraform.lock.hcl", Ecosystem::Terraform),
];

/// Suffix matches for names with a project-specific stem
const SUFFIXES: &[(&str, Ecosystem)] = &[
    (".csproj", Ecosystem::Nuget),
    (".vbproj", Ecosystem::Nuget),
    (".fsproj", Ecosystem::Nuget),
    (".vcxproj", Ecosystem::Nuget),
    (".nuspec", Ecosystem::Nuget),
    (".gemspec", Ecosystem::Bundler),
];

/// Returns the ecosystem implied by a filename, if any
pub fn classify(filename: &str) -> Option<Ecosystem> {
    if let Some((_, ecosystem)) = FILES.iter().find(|(name, _)| *name == filename) {
        return Some(*ecosystem);
    }

    SUFFIXES
        .iter()
        .find(|(suffix, _)| filename.len() > suffix.len() && filename.ends_with(suffix))
        .map(|(_, ecosystem)| *ecosystem)
}
