//! Loading specifications from the podspec JSON representation.
//!
//! The JSON form is what `pod ipc spec` prints for a `.podspec`, and what
//! spec repositories store as `.podspec.json`.

use std::path::Path;

use crate::error::{Result, SpecError};
use crate::spec::Specification;

/// Load a specification from a `.podspec.json` file.
pub fn load_spec_json(path: &Path) -> Result<Specification> {
    if !path.exists() {
        return Err(SpecError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_spec_json(&content)
}

/// Parse a specification from a JSON string.
pub fn parse_spec_json(json: &str) -> Result<Specification> {
    let spec: Specification = serde_json::from_str(json)?;
    Ok(spec)
}

/// Serialize a specification to pretty JSON.
pub fn spec_to_json(spec: &Specification) -> Result<String> {
    Ok(serde_json::to_string_pretty(spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    const FOO_JSON: &str = r#"{
  "name": "Foo",
  "version": "2.0",
  "summary": "ignored",
  "platforms": { "ios": "12.0", "osx": null, "visionos": "1.0" },
  "source_files": "Sources/**/*.{h,m,swift}",
  "public_header_files": ["Sources/Public/*.h"],
  "swift_versions": ["4.0", "5.1"],
  "dependencies": { "Bar": [], "Foo/Core": ["~> 2.0"] },
  "resource_bundles": { "FooAssets": "Assets/*.png" },
  "pod_target_xcconfig": { "OTHER_LDFLAGS": "-ObjC" },
  "static_framework": true,
  "ios": { "frameworks": "UIKit" },
  "subspecs": [
    { "name": "Core", "source_files": ["Core/*.m"], "osx": { "source_files": "Core/Mac/*.m" } }
  ]
}"#;

    #[test]
    fn parse_podspec_json() {
        let spec = parse_spec_json(FOO_JSON).unwrap();
        assert_eq!(spec.name, "Foo");
        assert_eq!(spec.version.as_deref(), Some("2.0"));
        assert_eq!(spec.platforms.len(), 1);
        assert_eq!(spec.platforms[&Platform::Ios], "12.0");
        assert!(spec.static_framework);
        assert_eq!(spec.attributes.source_files, vec!["Sources/**/*.{h,m,swift}"]);
        assert_eq!(spec.attributes.dependencies, vec!["Bar", "Foo/Core"]);
        assert_eq!(
            spec.attributes.swift_versions,
            Some(vec!["4.0".to_string(), "5.1".to_string()])
        );
        assert_eq!(spec.attributes.resource_bundles["FooAssets"], vec!["Assets/*.png"]);
        assert_eq!(spec.attributes.pod_target_xcconfig["OTHER_LDFLAGS"], "-ObjC");
        assert_eq!(spec.ios.as_ref().unwrap().frameworks, vec!["UIKit"]);

        let core = &spec.subspecs[0];
        assert_eq!(core.name, "Core");
        assert_eq!(
            core.platform_section(Platform::Osx).unwrap().source_files,
            vec!["Core/Mac/*.m"]
        );
    }

    #[test]
    fn parse_legacy_swift_version() {
        let spec = parse_spec_json(r#"{ "name": "Old", "swift_version": "4.2" }"#).unwrap();
        assert_eq!(spec.attributes.swift_versions, Some(vec!["4.2".to_string()]));
    }

    #[test]
    fn parse_missing_name_returns_error() {
        assert!(parse_spec_json(r#"{ "version": "1.0" }"#).is_err());
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(matches!(parse_spec_json("{ not json"), Err(SpecError::Json(_))));
    }

    #[test]
    fn serialized_spec_parses_back() {
        let spec = parse_spec_json(FOO_JSON).unwrap();
        let json = spec_to_json(&spec).unwrap();
        assert_eq!(parse_spec_json(&json).unwrap(), spec);
    }

    #[test]
    fn load_not_found() {
        let result = load_spec_json(Path::new("/nonexistent/Foo.podspec.json"));
        assert!(matches!(result, Err(SpecError::NotFound { .. })));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Foo.podspec.json");
        std::fs::write(&path, FOO_JSON).unwrap();

        let spec = load_spec_json(&path).unwrap();
        assert_eq!(spec.name, "Foo");
        assert_eq!(spec.subspecs.len(), 1);
    }
}
