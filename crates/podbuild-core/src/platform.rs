//! Platform ids and platform-conditional values.
//!
//! A [`PlatformValue`] holds a default plus explicit per-platform overrides.
//! Reading a platform that has no override yields the default.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::merge::Merge;

/// The Apple platforms a pod can declare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Osx,
    Tvos,
    Watchos,
}

impl Platform {
    /// Every known platform id, in emission order.
    pub const ALL: [Platform; 4] = [
        Platform::Ios,
        Platform::Osx,
        Platform::Tvos,
        Platform::Watchos,
    ];

    /// The platform whose resolved values end up in the emitted target.
    pub const PRIMARY: Platform = Platform::Ios;

    /// The podspec id for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Osx => "osx",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Platform::Ios),
            "osx" | "macos" => Ok(Platform::Osx),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            other => Err(SpecError::UnknownPlatform { name: other.into() }),
        }
    }
}

/// A value with a default and optional per-platform overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformValue<T> {
    /// Value for every platform without an override.
    pub default: T,
    /// Explicit per-platform values.
    #[serde(default)]
    pub overrides: BTreeMap<Platform, T>,
}

impl<T> PlatformValue<T> {
    /// A value with no overrides.
    pub fn new(default: T) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Add or replace the override for `platform`.
    pub fn with_override(mut self, platform: Platform, value: T) -> Self {
        self.overrides.insert(platform, value);
        self
    }

    /// The effective value for `platform`: its override, or the default.
    pub fn get(&self, platform: Platform) -> &T {
        self.overrides.get(&platform).unwrap_or(&self.default)
    }

    /// The effective value for [`Platform::PRIMARY`].
    pub fn primary(&self) -> &T {
        self.get(Platform::PRIMARY)
    }

    /// True when no platform overrides the default.
    pub fn is_uniform(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Transform the default and every override independently.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PlatformValue<U> {
        PlatformValue {
            default: f(self.default),
            overrides: self
                .overrides
                .into_iter()
                .map(|(platform, value)| (platform, f(value)))
                .collect(),
        }
    }

    /// Like [`map`](Self::map), but `f` also receives the slot's platform
    /// (`None` for the default).
    pub fn map_with_platform<U>(
        self,
        mut f: impl FnMut(Option<Platform>, T) -> U,
    ) -> PlatformValue<U> {
        PlatformValue {
            default: f(None, self.default),
            overrides: self
                .overrides
                .into_iter()
                .map(|(platform, value)| (platform, f(Some(platform), value)))
                .collect(),
        }
    }
}

impl<T: Clone> PlatformValue<T> {
    /// Combine two values with `merge`.
    ///
    /// The default is `merge(a.default, b.default)`. Every platform
    /// overridden on either side gets `merge` of both sides' effective
    /// values for that platform.
    pub fn combine(a: &Self, b: &Self, merge: impl Fn(T, T) -> T) -> Self {
        let platforms: BTreeSet<Platform> = a
            .overrides
            .keys()
            .chain(b.overrides.keys())
            .copied()
            .collect();
        let overrides = platforms
            .into_iter()
            .map(|p| (p, merge(a.get(p).clone(), b.get(p).clone())))
            .collect();
        Self {
            default: merge(a.default.clone(), b.default.clone()),
            overrides,
        }
    }

    /// Pair two values slot by slot.
    pub fn zip<U: Clone>(&self, other: &PlatformValue<U>) -> PlatformValue<(T, U)> {
        let platforms: BTreeSet<Platform> = self
            .overrides
            .keys()
            .chain(other.overrides.keys())
            .copied()
            .collect();
        PlatformValue {
            default: (self.default.clone(), other.default.clone()),
            overrides: platforms
                .into_iter()
                .map(|p| (p, (self.get(p).clone(), other.get(p).clone())))
                .collect(),
        }
    }

    /// Resolve one value per platform in `known`, filling in the default
    /// wherever no override exists.
    pub fn unpack(&self, known: &[Platform]) -> BTreeMap<Platform, T> {
        known.iter().map(|&p| (p, self.get(p).clone())).collect()
    }

    /// [`unpack`](Self::unpack) over [`Platform::ALL`], kept in
    /// `PlatformValue` shape.
    pub fn unpack_to_multi(&self) -> Self {
        Self {
            default: self.default.clone(),
            overrides: self.unpack(&Platform::ALL),
        }
    }
}

impl<T: Merge + Clone> Merge for PlatformValue<T> {
    fn merge(self, other: Self) -> Self {
        Self::combine(&self, &other, T::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn union(a: BTreeSet<String>, b: BTreeSet<String>) -> BTreeSet<String> {
        a.merge(b)
    }

    #[test]
    fn platform_ids_round_trip_through_from_str() {
        for p in Platform::ALL {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), p);
        }
        assert_eq!("macos".parse::<Platform>().unwrap(), Platform::Osx);
        assert!(matches!(
            "visionos".parse::<Platform>(),
            Err(SpecError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn get_falls_back_to_default() {
        let value = PlatformValue::new("all").with_override(Platform::Osx, "mac");
        assert_eq!(*value.get(Platform::Osx), "mac");
        assert_eq!(*value.get(Platform::Ios), "all");
        assert_eq!(*value.primary(), "all");
    }

    #[test]
    fn map_preserves_shape() {
        let value = PlatformValue::new(2).with_override(Platform::Tvos, 5);
        let mapped = value.map(|n| n * 10);
        assert_eq!(mapped.default, 20);
        assert_eq!(mapped.overrides.len(), 1);
        assert_eq!(mapped.overrides[&Platform::Tvos], 50);
    }

    #[test]
    fn map_with_platform_sees_slot() {
        let value = PlatformValue::new(()).with_override(Platform::Osx, ());
        let mapped = value.map_with_platform(|p, _| p);
        assert_eq!(mapped.default, None);
        assert_eq!(mapped.overrides[&Platform::Osx], Some(Platform::Osx));
    }

    #[test]
    fn combine_uses_effective_values() {
        let a = PlatformValue::new(set(&["a"])).with_override(Platform::Ios, set(&["a-ios"]));
        let b = PlatformValue::new(set(&["b"])).with_override(Platform::Osx, set(&["b-osx"]));
        let c = PlatformValue::combine(&a, &b, union);

        assert_eq!(c.default, set(&["a", "b"]));
        assert_eq!(c.overrides[&Platform::Ios], set(&["a-ios", "b"]));
        assert_eq!(c.overrides[&Platform::Osx], set(&["a", "b-osx"]));
        assert!(!c.overrides.contains_key(&Platform::Tvos));
    }

    #[test]
    fn combine_is_associative_and_commutative_for_sets() {
        let a = PlatformValue::new(set(&["a"])).with_override(Platform::Ios, set(&["ai"]));
        let b = PlatformValue::new(set(&["b"])).with_override(Platform::Osx, set(&["bo"]));
        let c = PlatformValue::new(set(&[]))
            .with_override(Platform::Ios, set(&["ci"]))
            .with_override(Platform::Watchos, set(&["cw"]));

        let left = PlatformValue::combine(&PlatformValue::combine(&a, &b, union), &c, union);
        let right = PlatformValue::combine(&a, &PlatformValue::combine(&b, &c, union), union);
        assert_eq!(left, right);

        let ab = PlatformValue::combine(&a, &b, union);
        let ba = PlatformValue::combine(&b, &a, union);
        assert_eq!(ab, ba);
    }

    #[test]
    fn unpack_fills_every_known_platform() {
        let value = PlatformValue::new("d").with_override(Platform::Watchos, "w");
        let unpacked = value.unpack(&Platform::ALL);
        assert_eq!(unpacked.len(), 4);
        assert_eq!(unpacked[&Platform::Ios], "d");
        assert_eq!(unpacked[&Platform::Watchos], "w");

        let only_ios = value.unpack(&[Platform::Ios]);
        assert_eq!(only_ios.len(), 1);
    }

    #[test]
    fn unpack_is_idempotent() {
        let value = PlatformValue::new(set(&["x"])).with_override(Platform::Osx, set(&["y"]));
        let once = value.unpack_to_multi();
        let twice = once.unpack_to_multi();
        assert_eq!(once, twice);
        assert_eq!(once.unpack(&Platform::ALL), value.unpack(&Platform::ALL));
    }

    #[test]
    fn zip_pairs_slots() {
        let a = PlatformValue::new(1).with_override(Platform::Ios, 2);
        let b = PlatformValue::new("x").with_override(Platform::Osx, "y");
        let z = a.zip(&b);
        assert_eq!(z.default, (1, "x"));
        assert_eq!(z.overrides[&Platform::Ios], (2, "x"));
        assert_eq!(z.overrides[&Platform::Osx], (1, "y"));
    }
}
