//! The pod specification tree and attribute collection.
//!
//! A [`Specification`] is read-only input: the root pod plus nested subspecs,
//! each carrying default attributes and optional per-platform sections.
//! Subspecs are flattened into an ordered list before attributes are
//! collected, so collection never walks the tree.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::merge::Merge;
use crate::platform::{Platform, PlatformValue};

/// Separator between a pod name and its subspec path (`Pod/Sub/Leaf`).
///
/// Paths returned by [`Specification::flatten_subspecs`] always use it;
/// dependency names may use another separator.
pub const SUBSPEC_SEPARATOR: &str = "/";

/// Attributes a spec, a subspec, or a platform section may declare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecAttributes {
    #[serde(deserialize_with = "de::string_or_seq")]
    pub source_files: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub exclude_files: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub public_header_files: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub private_header_files: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub resources: Vec<String>,
    /// Bundle name to resource patterns.
    #[serde(deserialize_with = "de::bundle_map")]
    pub resource_bundles: BTreeMap<String, Vec<String>>,
    /// Dependency names; podspec JSON declares these as a map of name to
    /// version requirements.
    #[serde(deserialize_with = "de::dependency_names")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub vendored_frameworks: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub vendored_libraries: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub frameworks: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub weak_frameworks: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub libraries: Vec<String>,
    #[serde(deserialize_with = "de::string_or_seq")]
    pub compiler_flags: Vec<String>,
    pub pod_target_xcconfig: BTreeMap<String, String>,
    #[serde(alias = "swift_version", deserialize_with = "de::opt_string_or_seq")]
    pub swift_versions: Option<Vec<String>>,
    pub module_name: Option<String>,
}

/// A pod specification with its nested subspecs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Minimum deployment version per platform.
    #[serde(default, deserialize_with = "de::platform_minimums")]
    pub platforms: BTreeMap<Platform, String>,
    #[serde(default)]
    pub static_framework: bool,
    #[serde(
        default,
        alias = "default_subspec",
        deserialize_with = "de::string_or_seq"
    )]
    pub default_subspecs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<SpecAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osx: Option<SpecAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvos: Option<SpecAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchos: Option<SpecAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subspecs: Vec<Specification>,
    #[serde(flatten)]
    pub attributes: SpecAttributes,
}

/// Collect a list attribute into a set.
pub fn set_of(items: &[String]) -> BTreeSet<String> {
    items.iter().cloned().collect()
}

impl Specification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The attributes declared for `platform` only.
    pub fn platform_section(&self, platform: Platform) -> Option<&SpecAttributes> {
        match platform {
            Platform::Ios => self.ios.as_ref(),
            Platform::Osx => self.osx.as_ref(),
            Platform::Tvos => self.tvos.as_ref(),
            Platform::Watchos => self.watchos.as_ref(),
        }
    }

    /// Mutable access to a platform section, creating it if absent.
    pub fn platform_section_mut(&mut self, platform: Platform) -> &mut SpecAttributes {
        let slot = match platform {
            Platform::Ios => &mut self.ios,
            Platform::Osx => &mut self.osx,
            Platform::Tvos => &mut self.tvos,
            Platform::Watchos => &mut self.watchos,
        };
        slot.get_or_insert_with(SpecAttributes::default)
    }

    /// Every declared platform section.
    pub fn platform_sections(&self) -> impl Iterator<Item = (Platform, &SpecAttributes)> {
        Platform::ALL
            .into_iter()
            .filter_map(|p| self.platform_section(p).map(|attrs| (p, attrs)))
    }

    /// One attribute of this spec alone, as a platform-conditional value.
    ///
    /// A platform section adds to the default through [`Merge`]: collections
    /// accumulate, optional scalars replace the default.
    pub fn attr<T, F>(&self, f: F) -> PlatformValue<T>
    where
        T: Merge + Clone,
        F: Fn(&SpecAttributes) -> T,
    {
        let default = f(&self.attributes);
        let overrides = self
            .platform_sections()
            .map(|(p, attrs)| (p, default.clone().merge(f(attrs))))
            .collect();
        PlatformValue { default, overrides }
    }

    /// One attribute gathered across this spec and `subspecs`, in order.
    ///
    /// `subspecs` is already flattened; nested subspecs are not visited.
    pub fn collect_attribute<T, F>(&self, subspecs: &[Specification], f: F) -> PlatformValue<T>
    where
        T: Merge + Clone,
        F: Fn(&SpecAttributes) -> T,
    {
        subspecs
            .iter()
            .fold(self.attr(&f), |acc, sub| acc.merge(sub.attr(&f)))
    }

    /// Every nested subspec in declaration pre-order, keyed by its path
    /// relative to this spec (`Core`, `Core/Extras`).
    pub fn flatten_subspecs(&self) -> Vec<(String, &Specification)> {
        fn walk<'a>(spec: &'a Specification, prefix: &str, out: &mut Vec<(String, &'a Specification)>) {
            for sub in &spec.subspecs {
                let path = if prefix.is_empty() {
                    sub.name.clone()
                } else {
                    format!("{prefix}{SUBSPEC_SEPARATOR}{}", sub.name)
                };
                out.push((path.clone(), sub));
                walk(sub, &path, out);
            }
        }

        let mut out = Vec::new();
        walk(self, "", &mut out);
        out
    }

    /// The subspec path named by `dependency` if it points into this pod.
    ///
    /// `separator` splits the dependency name (`Foo::Core` with `"::"`);
    /// an empty separator means [`SUBSPEC_SEPARATOR`]. The returned path is
    /// joined with [`SUBSPEC_SEPARATOR`].
    pub fn local_subspec_path(&self, dependency: &str, separator: &str) -> Option<String> {
        let separator = if separator.is_empty() {
            SUBSPEC_SEPARATOR
        } else {
            separator
        };
        let rest = dependency
            .strip_prefix(self.name.as_str())?
            .strip_prefix(separator)?;
        let parts: Vec<&str> = rest.split(separator).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(parts.join(SUBSPEC_SEPARATOR))
    }

    /// Choose the subspecs to build into this pod's target.
    ///
    /// Starts from `requested`, else `default_subspecs`, else every direct
    /// subspec. Selecting a subspec selects its nested subspecs and any
    /// subspec of this pod it depends on. The result is flat, in declaration
    /// order, with nested subspec lists stripped. `separator` is the one
    /// dependency names use, as for [`local_subspec_path`](Self::local_subspec_path).
    pub fn select_subspecs(&self, requested: &[String], separator: &str) -> Vec<Specification> {
        let all = self.flatten_subspecs();
        let roots: Vec<String> = if !requested.is_empty() {
            requested.to_vec()
        } else if !self.default_subspecs.is_empty() {
            self.default_subspecs.clone()
        } else {
            self.subspecs.iter().map(|s| s.name.clone()).collect()
        };

        let mut queue: VecDeque<String> = roots
            .iter()
            .map(|name| {
                self.local_subspec_path(name, separator)
                    .unwrap_or_else(|| name.clone())
            })
            .collect();
        let mut selected = BTreeSet::new();

        while let Some(path) = queue.pop_front() {
            if !selected.insert(path.clone()) {
                continue;
            }
            let nested_prefix = format!("{path}{SUBSPEC_SEPARATOR}");
            for (child, _) in all.iter().filter(|(p, _)| p.starts_with(&nested_prefix)) {
                queue.push_back(child.clone());
            }
            if let Some((_, spec)) = all.iter().find(|(p, _)| *p == path) {
                let deps = spec.attr(|a| set_of(&a.dependencies)).unpack_to_multi();
                let names = deps.overrides.values().chain([&deps.default]).flatten();
                queue.extend(names.filter_map(|d| self.local_subspec_path(d, separator)));
            }
        }

        all.into_iter()
            .filter(|(path, _)| selected.contains(path))
            .map(|(_, spec)| Specification {
                subspecs: Vec::new(),
                ..spec.clone()
            })
            .collect()
    }
}

mod de {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};

    use crate::platform::Platform;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    impl From<OneOrMany> for Vec<String> {
        fn from(value: OneOrMany) -> Self {
            match value {
                OneOrMany::One(s) => vec![s],
                OneOrMany::Many(v) => v,
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dependencies {
        Map(BTreeMap<String, serde_json::Value>),
        Many(Vec<String>),
        One(String),
    }

    pub fn string_or_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(Option::<OneOrMany>::deserialize(d)?
            .map(Vec::from)
            .unwrap_or_default())
    }

    pub fn opt_string_or_seq<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(Option::<OneOrMany>::deserialize(d)?.map(Vec::from))
    }

    pub fn bundle_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<String, Vec<String>>, D::Error> {
        let raw = Option::<BTreeMap<String, OneOrMany>>::deserialize(d)?.unwrap_or_default();
        Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
    }

    pub fn dependency_names<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<Dependencies>::deserialize(d)? {
            Some(Dependencies::Map(map)) => map.into_keys().collect(),
            Some(Dependencies::Many(names)) => names,
            Some(Dependencies::One(name)) => vec![name],
            None => Vec::new(),
        })
    }

    /// Unknown platforms and platforms without a minimum are skipped.
    pub fn platform_minimums<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<Platform, String>, D::Error> {
        let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(d)?.unwrap_or_default();
        Ok(raw
            .into_iter()
            .filter_map(|(name, version)| Some((name.parse().ok()?, version?)))
            .collect())
    }
}
