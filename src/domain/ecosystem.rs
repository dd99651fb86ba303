//! Package ecosystem identifiers understood by Dependabot

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package ecosystems that can be inferred from a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ecosystem {
    /// Ruby (Gemfile, *.gemspec)
    Bundler,
    /// Rust (Cargo.toml)
    Cargo,
    /// PHP (composer.json)
    Composer,
    /// Dockerfile base images
    Docker,
    /// Elm (elm-package.json)
    Elm,
    /// Git submodules (.gitmodules)
    Gitsubmodule,
    /// GitHub Actions workflows, detected by directory rather than filename
    GithubActions,
    /// Go modules (go.mod)
    Gomod,
    /// Gradle (build.gradle)
    Gradle,
    /// Maven (pom.xml)
    Maven,
    /// Elixir (mix.exs)
    Mix,
    /// JavaScript (package.json and lockfiles)
    Npm,
    /// .NET project files
    Nuget,
    /// Python (requirements.txt, Pipfile, setup.py, pyproject.toml)
    Pip,
    /// Dart/Flutter (pubspec.yaml)
    Pub,
    /// Swift Package Manager (Package.swift)
    Swift,
    /// Terraform (.terraform.lock.hcl)
    Terraform,
}

impl Ecosystem {
    /// Returns the `package-ecosystem` value written to the configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Bundler => "bundler",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Composer => "composer",
            Ecosystem::Docker => "docker",
            Ecosystem::Elm => "elm",
            Ecosystem::Gitsubmodule => "gitsubmodule",
            Ecosystem::GithubActions => "github-actions",
            Ecosystem::Gomod => "gomod",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Maven => "maven",
            Ecosystem::Mix => "mix",
            Ecosystem::Npm => "npm",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Pip => "pip",
            Ecosystem::Pub => "pub",
            Ecosystem::Swift => "swift",
            Ecosystem::Terraform => "terraform",
        }
    }

    /// Returns all known ecosystems
    #[cfg(test)]
    pub(crate) fn all() -> &'static [Ecosystem] {
        &[
            Ecosystem::Bundler,
            Ecosystem::Cargo,
            Ecosystem::Composer,
            Ecosystem::Docker,
            Ecosystem::Elm,
            Ecosystem::GithubActions,
            Ecosystem::Gitsubmodule,
            Ecosystem::Gomod,
            Ecosystem::Gradle,
            Ecosystem::Maven,
            Ecosystem::Mix,
            Ecosystem::Npm,
            Ecosystem::Nuget,
            Ecosystem::Pip,
            Ecosystem::Pub,
            Ecosystem::Swift,
            Ecosystem::Terraform,
        ]
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
