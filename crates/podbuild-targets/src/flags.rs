//! Compiler and linker flags.
//!
//! Flag extraction sits behind [`FlagExtractor`]; assembly passes the
//! resulting lists through untouched.

use std::collections::BTreeMap;

use podbuild_core::Specification;
use serde::Serialize;

use crate::options::BuildOptions;

/// Flags handed to the generated target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilerFlags {
    pub objc_copts: Vec<String>,
    pub swift_copts: Vec<String>,
    pub linkopts: Vec<String>,
    /// xcconfig settings not routed into a flag list.
    pub xcconfig: BTreeMap<String, String>,
}

/// Produces [`CompilerFlags`] for a spec and its subspecs.
pub trait FlagExtractor {
    fn extract(
        &self,
        spec: &Specification,
        subspecs: &[Specification],
        options: &BuildOptions,
    ) -> CompilerFlags;
}

const OBJC_FLAG_KEYS: &[&str] = &["OTHER_CFLAGS"];
const SWIFT_FLAG_KEYS: &[&str] = &["OTHER_SWIFT_FLAGS"];
const LINK_FLAG_KEYS: &[&str] = &["OTHER_LDFLAGS"];

/// Reads `compiler_flags` and `pod_target_xcconfig` for the primary platform.
///
/// `compiler_flags`, `OTHER_CFLAGS` feed objc copts, `OTHER_SWIFT_FLAGS`
/// swift copts, `OTHER_LDFLAGS` linkopts. Remaining settings are kept in
/// the xcconfig map with values from all specs joined by a space.
#[derive(Debug, Clone, Copy, Default)]
pub struct PodTargetFlags;

fn push_unique(target: &mut Vec<String>, flags: &str) {
    for flag in flags.split_whitespace() {
        if flag == "$(inherited)" || target.iter().any(|f| f == flag) {
            continue;
        }
        target.push(flag.to_string());
    }
}

impl FlagExtractor for PodTargetFlags {
    fn extract(
        &self,
        spec: &Specification,
        subspecs: &[Specification],
        _options: &BuildOptions,
    ) -> CompilerFlags {
        let mut flags = CompilerFlags::default();

        let compiler_flags = spec.collect_attribute(subspecs, |a| a.compiler_flags.clone());
        for entry in compiler_flags.primary() {
            push_unique(&mut flags.objc_copts, entry);
        }

        let xcconfig = spec.collect_attribute(subspecs, |a| {
            a.pod_target_xcconfig
                .iter()
                .map(|(k, v)| (k.clone(), vec![v.clone()]))
                .collect::<BTreeMap<String, Vec<String>>>()
        });
        for (key, values) in xcconfig.primary() {
            let joined = values.join(" ");
            if OBJC_FLAG_KEYS.contains(&key.as_str()) {
                push_unique(&mut flags.objc_copts, &joined);
            } else if SWIFT_FLAG_KEYS.contains(&key.as_str()) {
                push_unique(&mut flags.swift_copts, &joined);
            } else if LINK_FLAG_KEYS.contains(&key.as_str()) {
                push_unique(&mut flags.linkopts, &joined);
            } else {
                flags.xcconfig.insert(key.clone(), joined);
            }
        }

        flags
    }
}
