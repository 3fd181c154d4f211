//! Resolution of pod dependency names into Bazel labels.
//!
//! `Owner/Sub` where `Owner` is the pod being translated names one of its own
//! subspecs and resolves to a local `:` label. Anything else names another
//! pod and resolves through `dependency-template`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::options::BuildOptions;

/// Replace characters Bazel rejects in target names with `_`.
pub fn bazel_label(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

/// Label for a dependency supplied directly rather than read from the podspec.
pub fn local_label(name: &str) -> String {
    format!(":{name}")
}

/// Resolves the dependencies declared by one pod.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    pod_name: &'a str,
    options: &'a BuildOptions,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(pod_name: &'a str, options: &'a BuildOptions) -> Self {
        Self { pod_name, options }
    }

    fn separator(&self) -> &str {
        if self.options.subspec_separator.is_empty() {
            "/"
        } else {
            &self.options.subspec_separator
        }
    }

    /// The subspec path components if `dependency` names a subspec of the
    /// owning pod.
    pub fn local_subspec<'d>(&self, dependency: &'d str) -> Option<Vec<&'d str>> {
        let mut parts = dependency.split(self.separator());
        if parts.next()? != self.pod_name {
            return None;
        }
        let rest: Vec<&str> = parts.collect();
        if rest.is_empty() || rest.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(rest)
    }

    /// Resolve one dependency name into a label.
    pub fn resolve(&self, dependency: &str) -> String {
        if let Some(subspec) = self.local_subspec(dependency) {
            let joined = subspec.join("_");
            return format!(":{}_{}", bazel_label(self.pod_name), bazel_label(&joined));
        }

        let mut parts = dependency.split(self.separator());
        let pod = parts.next().unwrap_or(dependency);
        let subspec: Vec<&str> = parts.collect();
        self.options
            .dependency_template
            .replace("{prefix}", &self.options.deps_prefix)
            .replace("{pod}", &bazel_label(pod))
            .replace("{subspec}", &bazel_label(&subspec.join("_")))
    }

    /// Local-style labels survive only when they carry the dependency prefix.
    pub fn is_allowed(&self, label: &str) -> bool {
        !(label.starts_with(':') && !label.starts_with(&self.options.deps_prefix))
    }

    /// Resolve and filter a set of dependency names.
    pub fn resolve_all<'d>(&self, dependencies: impl IntoIterator<Item = &'d String>) -> BTreeSet<String> {
        dependencies
            .into_iter()
            .map(|dep| (dep, self.resolve(dep)))
            .filter(|(dep, label)| {
                let allowed = self.is_allowed(label);
                if !allowed {
                    debug!(dependency = %dep, label = %label, "local dependency label dropped");
                }
                allowed
            })
            .map(|(_, label)| label)
            .collect()
    }
}
