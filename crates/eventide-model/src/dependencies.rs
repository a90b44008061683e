//! Third-party dependencies declared by extensions and the resolution of
//! which of them must be exported with a build.
//!
//! Resolution runs three ordered filtering passes over the dependencies of
//! the used extensions:
//!
//! 1. keep dependencies of the requested export kind;
//! 2. drop dependencies requiring a non-empty extra setting when all their
//!    settings resolve to empty values;
//! 3. drop dependencies requiring another dependency that is absent from the
//!    result of pass 2.
//!
//! Pass 3 is a single hop: a dependency kept because its requirement
//! survived pass 2 stays kept even if that requirement is itself dropped by
//! pass 3.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::extension::EventsFunctionsExtension;
use crate::project::Project;

/// Packaging system a dependency is exported through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    Npm,
    Cordova,
    CopyToResources,
    /// No kind was declared.
    #[default]
    Unspecified,
    Other(String),
}

impl DependencyKind {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyKind::Npm => "npm",
            DependencyKind::Cordova => "cordova",
            DependencyKind::CopyToResources => "copyToResources",
            DependencyKind::Unspecified => "",
            DependencyKind::Other(kind) => kind,
        }
    }
}

impl From<String> for DependencyKind {
    fn from(kind: String) -> Self {
        DependencyKind::from(kind.as_str())
    }
}

impl From<&str> for DependencyKind {
    fn from(kind: &str) -> Self {
        match kind {
            "npm" => DependencyKind::Npm,
            "cordova" => DependencyKind::Cordova,
            "copyToResources" => DependencyKind::CopyToResources,
            "" => DependencyKind::Unspecified,
            other => DependencyKind::Other(other.to_string()),
        }
    }
}

impl From<DependencyKind> for String {
    fn from(kind: DependencyKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of an extra setting of a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraSetting {
    /// Used as is.
    Literal(String),
    /// Name of a property of the declaring extension, looked up in the
    /// project's extension property store.
    ExtensionProperty(String),
    /// A property of another extension, looked up the same way.
    ForeignExtensionProperty { extension: String, property: String },
}

/// A package an extension needs at export time.
///
/// Only the kind, the names and the version are persisted. Extra settings
/// and export conditions are attached by whoever builds the extension
/// declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDescriptor {
    pub name: String,
    #[serde(default)]
    pub export_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "type", default)]
    pub kind: DependencyKind,
    #[serde(skip)]
    pub extra_settings: IndexMap<String, ExtraSetting>,
    /// Only export when at least one extra setting resolves to a non-empty
    /// value.
    #[serde(skip)]
    pub only_if_some_extra_setting_non_empty: bool,
    /// Only export when the named dependency is exported too.
    #[serde(skip)]
    pub only_if_other_dependency_is_exported: Option<String>,
}

impl DependencyDescriptor {
    pub fn new(name: &str, kind: DependencyKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_export_name(mut self, export_name: &str) -> Self {
        self.export_name = export_name.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_extra_setting(mut self, key: &str, setting: ExtraSetting) -> Self {
        self.extra_settings.insert(key.to_string(), setting);
        self
    }

    pub fn only_if_some_extra_setting_non_empty(mut self) -> Self {
        self.only_if_some_extra_setting_non_empty = true;
        self
    }

    pub fn only_if_other_dependency_is_exported(mut self, other: &str) -> Self {
        self.only_if_other_dependency_is_exported = Some(other.to_string());
        self
    }

    /// Value of an extra setting once indirections through the project's
    /// extension properties are followed. Unset properties read as empty.
    pub fn resolved_setting<'p>(&'p self, project: &'p Project, extension: &str, key: &str) -> Option<&'p str> {
        self.extra_settings.get(key).map(|setting| match setting {
            ExtraSetting::Literal(value) => value.as_str(),
            ExtraSetting::ExtensionProperty(property) => project
                .extension_properties
                .get_value(extension, property)
                .unwrap_or(""),
            ExtraSetting::ForeignExtensionProperty {
                extension: owner,
                property,
            } => project
                .extension_properties
                .get_value(owner, property)
                .unwrap_or(""),
        })
    }

    fn has_non_empty_setting(&self, project: &Project, extension: &str) -> bool {
        self.extra_settings
            .keys()
            .filter_map(|key| self.resolved_setting(project, extension, key))
            .any(|value| !value.is_empty())
    }
}

/// A dependency to export, paired with the extension declaring it.
#[derive(Debug, Clone, Copy)]
pub struct ExportedDependency<'a> {
    pub dependency: &'a DependencyDescriptor,
    pub extension: &'a EventsFunctionsExtension,
}

/// Computes the dependencies of `used` extensions to export for `kind`.
///
/// Preconditions: none. Names in `used` that no extension of the project
/// declares are reported and ignored.
/// Postconditions: the result follows extension order, then declaration
/// order inside each extension.
pub fn resolve_exported_dependencies<'a>(
    project: &'a Project,
    used: &BTreeSet<String>,
    kind: &DependencyKind,
) -> Vec<ExportedDependency<'a>> {
    for name in used {
        if !project.extensions.has(name) {
            warn!("Extension {} is marked as used but is not declared in the project", name);
        }
    }

    let of_kind: Vec<ExportedDependency<'a>> = project
        .extensions
        .iter()
        .filter(|extension| used.contains(&extension.name))
        .flat_map(|extension| {
            extension
                .dependencies
                .iter()
                .map(move |dependency| ExportedDependency { dependency, extension })
        })
        .filter(|exported| {
            if exported.dependency.kind == DependencyKind::Unspecified {
                warn!(
                    "Dependency {} of extension {} has no type and is not exported",
                    exported.dependency.name, exported.extension.name
                );
                return false;
            }
            exported.dependency.kind == *kind
        })
        .collect();

    let with_settings: Vec<ExportedDependency<'a>> = of_kind
        .into_iter()
        .filter(|exported| {
            let dependency = exported.dependency;
            let keep = !dependency.only_if_some_extra_setting_non_empty
                || dependency.has_non_empty_setting(project, &exported.extension.name);
            if !keep {
                debug!("Dropping dependency {}: all its extra settings are empty", dependency.name);
            }
            keep
        })
        .collect();

    with_settings
        .iter()
        .filter(|exported| match &exported.dependency.only_if_other_dependency_is_exported {
            None => true,
            Some(other) => {
                let keep = with_settings
                    .iter()
                    .any(|candidate| &candidate.dependency.name == other);
                if !keep {
                    debug!(
                        "Dropping dependency {}: it requires {} which is not exported",
                        exported.dependency.name, other
                    );
                }
                keep
            }
        })
        .copied()
        .collect()
}
