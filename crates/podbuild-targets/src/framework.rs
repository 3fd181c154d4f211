//! The `apple_framework` target: assembly from a spec and AST emission.
//!
//! Assembly flattens a spec and its selected subspecs into one record of
//! platform-conditional attributes. Emission resolves the record for the
//! primary platform and drops every attribute whose value is empty.

use std::collections::{BTreeMap, BTreeSet};

use podbuild_core::pattern::{HEADER_FILE_TYPES, SOURCE_FILE_TYPES};
use podbuild_core::spec::set_of;
use podbuild_core::{
    extract_files, extract_resources, FilePattern, Merge, Platform, PlatformValue,
    SpecAttributes, Specification,
};
use podbuild_starlark::{BuildFile, StarlarkNode, ToStarlark, DEFAULT_CONDITION};
use serde::Serialize;
use tracing::debug;

use crate::classify::{classify_artifacts, ClassifiedArtifacts};
use crate::deps::{local_label, DependencyResolver};
use crate::flags::{CompilerFlags, FlagExtractor, PodTargetFlags};
use crate::options::BuildOptions;
use crate::probe::{ConfiguredProbe, LinkageProbe};

/// The rule this target instantiates.
pub const RULE_NAME: &str = "apple_framework";

/// The module defining [`RULE_NAME`].
pub const RULE_MODULE: &str = "@build_bazel_rules_ios//rules:framework.bzl";

/// Namespace of generated bundle identifiers.
pub const BUNDLE_ID_NAMESPACE: &str = "org.cocoapods";

/// The `select()` key for release builds.
pub const RELEASE_CONDITION: &str = ":release";

const SWIFT_BASE_DEFINES: &[&str] = &["COCOAPODS"];
const OBJC_BASE_DEFINES: &[&str] = &["COCOAPODS=1"];
const SWIFT_RELEASE_DEFINES: &[&str] = &[];
const SWIFT_DEBUG_DEFINES: &[&str] = &["DEBUG"];
const OBJC_RELEASE_DEFINES: &[&str] = &["POD_CONFIGURATION_RELEASE=1"];
const OBJC_DEBUG_DEFINES: &[&str] = &["POD_CONFIGURATION_DEBUG=1", "DEBUG=1"];

/// Collaborators used during assembly.
#[derive(Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub options: &'a BuildOptions,
    pub probe: &'a dyn LinkageProbe,
    pub flags: &'a dyn FlagExtractor,
}

impl<'a> AssemblyContext<'a> {
    /// A context using [`ConfiguredProbe`] and [`PodTargetFlags`].
    pub fn new(options: &'a BuildOptions) -> Self {
        Self {
            options,
            probe: &ConfiguredProbe,
            flags: &PodTargetFlags,
        }
    }

    pub fn with_probe(self, probe: &'a dyn LinkageProbe) -> Self {
        Self { probe, ..self }
    }

    pub fn with_flags(self, flags: &'a dyn FlagExtractor) -> Self {
        Self { flags, ..self }
    }
}

/// A fully resolved `apple_framework` target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppleFramework {
    pub name: String,
    pub version: String,
    pub module_name: PlatformValue<String>,
    pub link_dynamic: bool,
    pub infoplists: Vec<String>,
    pub platforms: BTreeMap<Platform, String>,
    pub swift_version: PlatformValue<Option<String>>,

    pub source_files: PlatformValue<FilePattern>,
    pub public_headers: PlatformValue<FilePattern>,
    pub private_headers: PlatformValue<FilePattern>,

    /// Loose resource globs.
    pub resources: PlatformValue<BTreeSet<String>>,
    /// `.bundle` directories listed among the resources.
    pub bundles: PlatformValue<BTreeSet<String>>,
    pub resource_bundles: PlatformValue<BTreeMap<String, BTreeSet<String>>>,

    pub deps: PlatformValue<BTreeSet<String>>,
    pub vendored: PlatformValue<ClassifiedArtifacts>,

    pub objc_defines: Vec<String>,
    pub swift_defines: Vec<String>,

    pub sdk_dylibs: PlatformValue<BTreeSet<String>>,
    pub sdk_frameworks: PlatformValue<BTreeSet<String>>,
    pub weak_sdk_frameworks: PlatformValue<BTreeSet<String>>,

    pub flags: CompilerFlags,
}

/// The declared module name, or the pod name with `-` replaced by `_`.
pub fn resolve_module_name(spec: &Specification) -> PlatformValue<String> {
    let fallback = spec.name.replace('-', "_");
    spec.attr(|a| a.module_name.clone())
        .map(|name| name.filter(|n| !n.is_empty()).unwrap_or_else(|| fallback.clone()))
}

/// Pick the Swift language version from declared version strings.
///
/// Unparseable entries are ignored. Any version >= 5.0 selects `"5"`,
/// else any >= 4.2 selects `"4.2"`, else any parsed version selects `"4"`.
/// `None` leaves the version unpinned.
pub fn swift_version_from(versions: &[String]) -> Option<String> {
    let parsed: Vec<f64> = versions
        .iter()
        .filter_map(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    if parsed.iter().any(|&v| v >= 5.0) {
        Some("5".into())
    } else if parsed.iter().any(|&v| v >= 4.2) {
        Some("4.2".into())
    } else if !parsed.is_empty() {
        Some("4".into())
    } else {
        None
    }
}

/// [`swift_version_from`] applied per platform.
pub fn resolve_swift_version(spec: &Specification) -> PlatformValue<Option<String>> {
    spec.attr(|a| a.swift_versions.clone())
        .map(|versions| versions.and_then(|v| swift_version_from(&v)))
}

/// Declared platform minimums, with the configured iOS version filled in
/// when iOS is missing.
pub fn resolve_platforms(spec: &Specification, options: &BuildOptions) -> BTreeMap<Platform, String> {
    let mut platforms = spec.platforms.clone();
    platforms
        .entry(Platform::PRIMARY)
        .or_insert_with(|| options.ios_platform.clone());
    platforms
}

type ListAttr = fn(&SpecAttributes) -> &Vec<String>;

static NO_PATTERNS: Vec<String> = Vec::new();

/// Collect include and exclude patterns, expanded against `file_types`.
fn collect_files(
    spec: &Specification,
    subspecs: &[Specification],
    includes: ListAttr,
    excludes: ListAttr,
    file_types: &[&str],
) -> PlatformValue<FilePattern> {
    let included = spec.collect_attribute(subspecs, |a| extract_files(includes(a), file_types));
    let excluded = spec.collect_attribute(subspecs, |a| extract_files(excludes(a), file_types));
    included
        .zip(&excluded)
        .map(|(include, exclude)| FilePattern::from_matches(include, exclude))
}

fn is_bundle(path: &str) -> bool {
    path.trim_end_matches('/').ends_with(".bundle")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl AppleFramework {
    /// Assemble the target for `spec` and its flattened `subspecs`.
    ///
    /// `deps` are target names supplied by the caller; they bypass
    /// resolution and are referenced as local labels.
    pub fn assemble(
        spec: &Specification,
        subspecs: &[Specification],
        deps: &BTreeSet<String>,
        ctx: &AssemblyContext<'_>,
    ) -> Self {
        let options = ctx.options;
        let name = spec.name.clone();

        let source_files = collect_files(
            spec,
            subspecs,
            |a| &a.source_files,
            |a| &a.exclude_files,
            SOURCE_FILE_TYPES,
        );
        let public_headers = collect_files(
            spec,
            subspecs,
            |a| &a.public_header_files,
            |a| &a.private_header_files,
            HEADER_FILE_TYPES,
        );
        let private_headers = collect_files(
            spec,
            subspecs,
            |a| &a.private_header_files,
            |_| &NO_PATTERNS,
            HEADER_FILE_TYPES,
        );

        let all_resources = spec
            .collect_attribute(subspecs, |a| set_of(&a.resources))
            .unpack_to_multi();
        let resources = all_resources.clone().map(|paths| {
            let loose: Vec<String> = paths.into_iter().filter(|p| !is_bundle(p)).collect();
            extract_resources(&loose)
        });
        let bundles = all_resources.map(|paths| paths.into_iter().filter(|p| is_bundle(p)).collect());
        let resource_bundles = spec.collect_attribute(subspecs, |a| {
            a.resource_bundles
                .iter()
                .map(|(bundle, patterns)| (bundle.clone(), extract_resources(patterns)))
                .collect::<BTreeMap<String, BTreeSet<String>>>()
        });

        let resolver = DependencyResolver::new(&spec.name, options);
        let spec_deps = spec
            .collect_attribute(subspecs, |a| set_of(&a.dependencies))
            .map(|names| resolver.resolve_all(&names));
        let explicit_deps: BTreeSet<String> = deps.iter().map(|d| local_label(d)).collect();
        let deps = PlatformValue::new(explicit_deps).merge(spec_deps);

        let vendored = classify_artifacts(
            &spec.collect_attribute(subspecs, |a| set_of(&a.vendored_frameworks)),
            &spec.collect_attribute(subspecs, |a| set_of(&a.vendored_libraries)),
            ctx.probe,
            options,
        );

        let link_dynamic =
            options.link_dynamic && !source_files.primary().is_empty() && !spec.static_framework;

        let framework = Self {
            version: spec.version.clone().unwrap_or_else(|| "1.0".into()),
            module_name: resolve_module_name(spec),
            link_dynamic,
            infoplists: Vec::new(),
            platforms: resolve_platforms(spec, options),
            swift_version: resolve_swift_version(spec),
            source_files,
            public_headers,
            private_headers,
            resources,
            bundles,
            resource_bundles,
            deps,
            vendored,
            objc_defines: strings(OBJC_BASE_DEFINES),
            swift_defines: strings(SWIFT_BASE_DEFINES),
            sdk_dylibs: spec.collect_attribute(subspecs, |a| set_of(&a.libraries)),
            sdk_frameworks: spec.collect_attribute(subspecs, |a| set_of(&a.frameworks)),
            weak_sdk_frameworks: spec.collect_attribute(subspecs, |a| set_of(&a.weak_frameworks)),
            flags: ctx.flags.extract(spec, subspecs, options),
            name,
        };

        debug!(
            pod = %framework.name,
            subspecs = subspecs.len(),
            deps = framework.deps.primary().len(),
            link_dynamic = framework.link_dynamic,
            "assembled apple_framework"
        );
        framework
    }

    /// `org.cocoapods.<name>`.
    pub fn bundle_id(&self) -> String {
        format!("{BUNDLE_ID_NAMESPACE}.{}", self.name)
    }

    /// Whether the primary platform has any sources to link.
    pub fn can_link_dynamic(&self) -> bool {
        !self.source_files.primary().is_empty()
    }

    /// Reference a generated Info.plist target.
    pub fn add_info_plist(&mut self, target_name: &str) {
        self.infoplists.push(local_label(target_name));
    }

    /// The `load()` statement for [`RULE_NAME`].
    pub fn load_node() -> StarlarkNode {
        StarlarkNode::load(RULE_MODULE, &[RULE_NAME])
    }

    /// The load statement followed by the target call.
    pub fn build_file(&self) -> BuildFile {
        let mut file = BuildFile::new();
        file.push(Self::load_node());
        file.push(self.to_starlark());
        file
    }

    /// Loose resources and `.bundle` directories, added together when both
    /// exist.
    fn data_node(&self) -> StarlarkNode {
        let resources = self.resources.primary();
        let bundles = self.bundles.primary();
        let resources_node = FilePattern::include_only(resources.clone()).to_starlark();
        let bundles_node = bundles.to_starlark();

        match (resources.is_empty(), bundles.is_empty()) {
            (true, true) => StarlarkNode::Empty,
            (false, true) => resources_node,
            (true, false) => bundles_node,
            (false, false) => resources_node.add(bundles_node),
        }
    }

    fn defines_node(base: &[String], release: &[&str], debug: &[&str]) -> StarlarkNode {
        let select = StarlarkNode::Select(vec![
            (RELEASE_CONDITION.to_string(), strings(release).to_starlark()),
            (DEFAULT_CONDITION.to_string(), strings(debug).to_starlark()),
        ]);
        base.to_vec().to_starlark().add(select)
    }
}

impl ToStarlark for AppleFramework {
    fn to_starlark(&self) -> StarlarkNode {
        let vendored = self.vendored.primary();
        let resource_bundles: BTreeMap<&String, FilePattern> = self
            .resource_bundles
            .primary()
            .iter()
            .map(|(bundle, globs)| (bundle, FilePattern::include_only(globs.clone())))
            .collect();

        let args = vec![
            StarlarkNode::named("name", self.name.to_starlark()),
            StarlarkNode::named("module_name", self.module_name.primary().to_starlark()),
            StarlarkNode::named("bundle_id", self.bundle_id().to_starlark()),
            StarlarkNode::named("swift_version", self.swift_version.to_starlark()),
            StarlarkNode::named("link_dynamic", self.link_dynamic.to_starlark()),
            StarlarkNode::named("infoplists", self.infoplists.to_starlark()),
            StarlarkNode::named("platforms", self.platforms.to_starlark()),
            StarlarkNode::named("srcs", self.source_files.primary().to_starlark()),
            StarlarkNode::named("public_headers", self.public_headers.primary().to_starlark()),
            StarlarkNode::named("private_headers", self.private_headers.primary().to_starlark()),
            StarlarkNode::named("data", self.data_node()),
            StarlarkNode::named("resource_bundles", resource_bundles.to_starlark()),
            StarlarkNode::named("deps", self.deps.primary().to_starlark()),
            StarlarkNode::named("vendored_xcframeworks", vendored.xcframeworks.to_starlark()),
            StarlarkNode::named(
                "vendored_static_frameworks",
                vendored.static_frameworks.to_starlark(),
            ),
            StarlarkNode::named(
                "vendored_dynamic_frameworks",
                vendored.dynamic_frameworks.to_starlark(),
            ),
            StarlarkNode::named(
                "vendored_static_libraries",
                vendored.static_libraries.to_starlark(),
            ),
            StarlarkNode::named(
                "objc_defines",
                Self::defines_node(&self.objc_defines, OBJC_RELEASE_DEFINES, OBJC_DEBUG_DEFINES),
            ),
            StarlarkNode::named(
                "swift_defines",
                Self::defines_node(&self.swift_defines, SWIFT_RELEASE_DEFINES, SWIFT_DEBUG_DEFINES),
            ),
            StarlarkNode::named("sdk_dylibs", self.sdk_dylibs.primary().to_starlark()),
            StarlarkNode::named("sdk_frameworks", self.sdk_frameworks.primary().to_starlark()),
            StarlarkNode::named(
                "weak_sdk_frameworks",
                self.weak_sdk_frameworks.primary().to_starlark(),
            ),
            StarlarkNode::named("objc_copts", self.flags.objc_copts.to_starlark()),
            StarlarkNode::named("swift_copts", self.flags.swift_copts.to_starlark()),
            StarlarkNode::named("linkopts", self.flags.linkopts.to_starlark()),
            StarlarkNode::named("xcconfig", self.flags.xcconfig.to_starlark()),
            StarlarkNode::named(
                "visibility",
                vec!["//visibility:public".to_string()].to_starlark(),
            ),
        ];

        StarlarkNode::call_omitting_empty(RULE_NAME, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::XcFrameworkSlice;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assemble(spec: &Specification, subspecs: &[Specification], options: &BuildOptions) -> AppleFramework {
        AppleFramework::assemble(spec, subspecs, &BTreeSet::new(), &AssemblyContext::new(options))
    }

    fn foo_spec() -> Specification {
        let mut spec = Specification::new("Foo");
        spec.version = Some("2.0".into());
        spec.platforms.insert(Platform::Ios, "12.0".into());
        spec.attributes.source_files = vec!["Sources/**/*.swift".into()];
        spec.attributes.dependencies = vec!["Bar".into()];
        spec
    }

    struct AllDynamic;

    impl LinkageProbe for AllDynamic {
        fn is_dynamic(&self, _path: &str, _options: &BuildOptions) -> bool {
            true
        }

        fn xcframework_slices(
            &self,
            _path: &str,
            _options: &BuildOptions,
        ) -> Option<Vec<XcFrameworkSlice>> {
            None
        }
    }

    #[test]
    fn module_name_replaces_hyphens() {
        let spec = Specification::new("my-pod");
        assert_eq!(resolve_module_name(&spec).primary(), "my_pod");
    }

    #[test]
    fn module_name_override_wins_unless_empty() {
        let mut spec = Specification::new("my-pod");
        spec.attributes.module_name = Some("MyPod".into());
        assert_eq!(resolve_module_name(&spec).primary(), "MyPod");

        spec.attributes.module_name = Some(String::new());
        assert_eq!(resolve_module_name(&spec).primary(), "my_pod");
    }

    #[test]
    fn swift_version_selection() {
        let v = |items: &[&str]| swift_version_from(&items.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        assert_eq!(v(&[]), None);
        assert_eq!(v(&["4.0", "5.1"]), Some("5".into()));
        assert_eq!(v(&["4.2"]), Some("4.2".into()));
        assert_eq!(v(&["3.0", "4.0"]), Some("4".into()));
        assert_eq!(v(&["notanumber"]), None);
        assert_eq!(v(&["5.0.1", "4.2"]), Some("4.2".into()));
    }

    #[test]
    fn swift_version_unspecified_without_declarations() {
        let spec = Specification::new("Foo");
        assert_eq!(resolve_swift_version(&spec).primary(), &None);
    }

    #[test]
    fn platforms_inject_default_ios() {
        let options = BuildOptions::default();
        let mut spec = Specification::new("Foo");
        spec.platforms.insert(Platform::Osx, "10.15".into());
        let platforms = resolve_platforms(&spec, &options);
        assert_eq!(platforms[&Platform::Ios], "13.0");
        assert_eq!(platforms[&Platform::Osx], "10.15");

        spec.platforms.insert(Platform::Ios, "11.0".into());
        assert_eq!(resolve_platforms(&spec, &options)[&Platform::Ios], "11.0");
    }

    #[test]
    fn link_dynamic_requires_option_sources_and_non_static() {
        let spec = foo_spec();
        let dynamic = BuildOptions {
            link_dynamic: true,
            ..Default::default()
        };
        assert!(assemble(&spec, &[], &dynamic).link_dynamic);
        assert!(!assemble(&spec, &[], &BuildOptions::default()).link_dynamic);

        let mut static_spec = foo_spec();
        static_spec.static_framework = true;
        assert!(!assemble(&static_spec, &[], &dynamic).link_dynamic);

        let mut no_sources = foo_spec();
        no_sources.attributes.source_files.clear();
        let framework = assemble(&no_sources, &[], &dynamic);
        assert!(!framework.link_dynamic);
        assert!(!framework.can_link_dynamic());
    }

    #[test]
    fn sources_merge_subspecs_and_apply_excludes() {
        let mut spec = Specification::new("Foo");
        spec.attributes.source_files = vec!["Root/*.{h,m}".into()];
        let mut core = Specification::new("Core");
        core.attributes.source_files = vec!["Core/**".into()];
        core.attributes.exclude_files = vec!["Core/Tests/**/*.m".into(), "Core/**/*.png".into()];

        let framework = assemble(&spec, &[core], &BuildOptions::default());
        let srcs = framework.source_files.primary();
        assert!(srcs.include.contains("Root/*.h"));
        assert!(srcs.include.contains("Root/*.m"));
        assert!(srcs.include.contains("Core/**/*.swift"));
        assert_eq!(srcs.exclude, set(&["Core/Tests/**/*.m"]));
    }

    #[test]
    fn headers_split_public_and_private() {
        let mut spec = Specification::new("Foo");
        spec.attributes.public_header_files = vec!["Headers/*.h".into(), "Internal/*.h".into()];
        spec.attributes.private_header_files = vec!["Internal/*.h".into()];

        let framework = assemble(&spec, &[], &BuildOptions::default());
        assert_eq!(framework.public_headers.primary().include, set(&["Headers/*.h"]));
        assert_eq!(framework.public_headers.primary().exclude, set(&["Internal/*.h"]));
        assert_eq!(framework.private_headers.primary().include, set(&["Internal/*.h"]));
    }

    #[test]
    fn resources_and_bundles_are_separated() {
        let mut spec = Specification::new("Foo");
        spec.attributes.resources = vec!["Res/*.png".into(), "Res/Foo.bundle".into()];
        spec.attributes.resource_bundles.insert("FooAssets".into(), vec!["Assets/**".into()]);

        let framework = assemble(&spec, &[], &BuildOptions::default());
        assert_eq!(framework.resources.primary(), &set(&["Res/*.png"]));
        assert_eq!(framework.bundles.primary(), &set(&["Res/Foo.bundle"]));
        assert_eq!(
            framework.resource_bundles.primary()["FooAssets"],
            set(&["Assets/**/*"])
        );
    }

    #[test]
    fn resource_bundle_without_patterns_is_omitted() {
        let mut spec = foo_spec();
        spec.attributes.resource_bundles.insert("FooEmpty".into(), Vec::new());
        let node = assemble(&spec, &[], &BuildOptions::default()).to_starlark();
        assert!(node.argument("resource_bundles").is_none());

        spec.attributes.resource_bundles.insert("FooAssets".into(), vec!["Assets/**".into()]);
        let framework = assemble(&spec, &[], &BuildOptions::default());
        let rendered = framework.build_file().render();
        assert!(rendered.contains(
            "    resource_bundles = {\n        \"FooAssets\": glob([\"Assets/**/*\"]),\n    },\n"
        ));
        assert!(!rendered.contains("FooEmpty"));
    }

    #[test]
    fn data_is_absent_without_resources() {
        let framework = assemble(&foo_spec(), &[], &BuildOptions::default());
        assert!(framework.to_starlark().argument("data").is_none());
    }

    #[test]
    fn data_adds_resources_and_bundles() {
        let mut spec = foo_spec();
        spec.attributes.resources = vec!["Res/*.png".into(), "Res/Foo.bundle".into()];
        let node = assemble(&spec, &[], &BuildOptions::default()).to_starlark();

        let Some(StarlarkNode::Expr { lhs, op, rhs }) = node.argument("data") else {
            panic!("expected an additive data expression");
        };
        assert_eq!(op, "+");
        assert!(matches!(&**lhs, StarlarkNode::Call { name, .. } if name == "glob"));
        assert_eq!(
            &**rhs,
            &StarlarkNode::Set(vec![StarlarkNode::str("Res/Foo.bundle")])
        );
    }

    #[test]
    fn data_with_one_kind_is_emitted_alone() {
        let mut spec = foo_spec();
        spec.attributes.resources = vec!["Res/Foo.bundle".into()];
        let node = assemble(&spec, &[], &BuildOptions::default()).to_starlark();
        assert_eq!(
            node.argument("data"),
            Some(&StarlarkNode::Set(vec![StarlarkNode::str("Res/Foo.bundle")]))
        );
    }

    #[test]
    fn dynamic_vendored_framework_only_in_xcframeworks() {
        let mut spec = foo_spec();
        spec.attributes.vendored_frameworks = vec!["Vendor/Dyn.framework".into()];
        let options = BuildOptions::default();
        let ctx = AssemblyContext::new(&options).with_probe(&AllDynamic);
        let framework = AppleFramework::assemble(&spec, &[], &BTreeSet::new(), &ctx);

        let vendored = framework.vendored.primary();
        assert!(vendored.dynamic_frameworks.is_empty());
        assert_eq!(vendored.xcframeworks.len(), 1);

        let node = framework.to_starlark();
        assert!(node.argument("vendored_dynamic_frameworks").is_none());
        assert!(node.argument("vendored_xcframeworks").is_some());
    }

    #[test]
    fn explicit_deps_bypass_resolution() {
        let options = BuildOptions::default();
        let mut spec = foo_spec();
        spec.attributes.dependencies = vec!["Foo/Core".into(), "Bar".into()];
        let framework = AppleFramework::assemble(
            &spec,
            &[],
            &set(&["Foo_InfoPlist"]),
            &AssemblyContext::new(&options),
        );
        assert_eq!(
            framework.deps.primary(),
            &set(&[":Foo_InfoPlist", "//Pods/Bar"])
        );
    }

    #[test]
    fn defines_select_on_release() {
        let node = assemble(&foo_spec(), &[], &BuildOptions::default()).to_starlark();
        let rendered = podbuild_starlark::render(node.argument("objc_defines").unwrap());
        assert!(rendered.starts_with("[\"COCOAPODS=1\"] + select({"));
        assert!(rendered.contains("\":release\": [\"POD_CONFIGURATION_RELEASE=1\"]"));
        assert!(rendered.contains("\"POD_CONFIGURATION_DEBUG=1\""));

        let swift = podbuild_starlark::render(node.argument("swift_defines").unwrap());
        assert!(swift.starts_with("[\"COCOAPODS\"] + select({"));
        assert!(swift.contains("\":release\": []"));
        assert!(swift.contains("\"//conditions:default\": [\"DEBUG\"]"));
    }

    #[test]
    fn info_plists_are_local_labels() {
        let mut framework = assemble(&foo_spec(), &[], &BuildOptions::default());
        framework.add_info_plist("Foo_InfoPlist");
        let node = framework.to_starlark();
        assert_eq!(
            node.argument("infoplists"),
            Some(&StarlarkNode::List(vec![StarlarkNode::str(":Foo_InfoPlist")]))
        );
    }

    #[test]
    fn record_serializes_with_platform_ids() {
        let framework = assemble(&foo_spec(), &[], &BuildOptions::default());
        let value = serde_json::to_value(&framework).unwrap();
        assert_eq!(value["platforms"]["ios"], "12.0");
        assert_eq!(value["module_name"]["default"], "Foo");
        assert_eq!(value["objc_defines"][0], "COCOAPODS=1");
    }

    #[test]
    fn end_to_end_foo() {
        let framework = assemble(&foo_spec(), &[], &BuildOptions::default());
        assert_eq!(framework.bundle_id(), "org.cocoapods.Foo");
        assert_eq!(framework.version, "2.0");

        let node = framework.to_starlark();
        assert!(matches!(&node, StarlarkNode::Call { name, .. } if name == RULE_NAME));
        assert_eq!(node.argument("name"), Some(&StarlarkNode::str("Foo")));
        assert_eq!(node.argument("module_name"), Some(&StarlarkNode::str("Foo")));
        assert_eq!(
            node.argument("bundle_id"),
            Some(&StarlarkNode::str("org.cocoapods.Foo"))
        );
        assert_eq!(
            node.argument("deps"),
            Some(&StarlarkNode::Set(vec![StarlarkNode::str("//Pods/Bar")]))
        );
        assert!(node.argument("swift_version").is_none());
        assert!(node.argument("public_headers").is_none());
        assert!(node.argument("xcconfig").is_none());
        for attr in [
            "vendored_xcframeworks",
            "vendored_static_frameworks",
            "vendored_dynamic_frameworks",
            "vendored_static_libraries",
        ] {
            assert!(node.argument(attr).is_none(), "{attr} should be omitted");
        }

        let rendered = framework.build_file().render();
        assert!(rendered.starts_with(
            "load(\"@build_bazel_rules_ios//rules:framework.bzl\", \"apple_framework\")\n\napple_framework(\n"
        ));
        assert!(rendered.contains("    srcs = glob([\"Sources/**/*.swift\"]),\n"));
        assert!(rendered.contains("    link_dynamic = False,\n"));
        assert!(rendered.contains("    platforms = {\n        \"ios\": \"12.0\",\n    },\n"));
        assert!(rendered.contains("    visibility = [\"//visibility:public\"],\n"));
        assert!(rendered.ends_with(")\n"));
    }
}
