//! Packagist API response types
//!
//! Every struct defaults missing (or `null`) fields to their empty value, so a
//! decoded response is always fully populated.

use std::collections::HashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope for `GET /packages/list.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageListResult {
    /// Package names in `vendor/name` form, in server order
    #[serde(rename = "packageNames", deserialize_with = "nullable")]
    pub package_names: Vec<String>,
}

/// Envelope for `GET /packages/{name}.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageResult {
    #[serde(deserialize_with = "nullable")]
    pub package: Package,
}

/// Package metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Package {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    /// Creation time, ISO-8601, left unparsed
    #[serde(deserialize_with = "nullable")]
    pub time: String,
    #[serde(deserialize_with = "nullable")]
    pub maintainers: Vec<HashMap<String, String>>,
    /// Versions keyed by label, e.g. `dev-master` or `1.0.0`
    #[serde(deserialize_with = "nullable")]
    pub versions: HashMap<String, Version>,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub package_type: String,
    #[serde(deserialize_with = "nullable")]
    pub repository: String,
    /// Download counts keyed by period (`total`, `monthly`, `daily`)
    #[serde(alias = "download", deserialize_with = "nullable")]
    pub downloads: HashMap<String, i64>,
    #[serde(deserialize_with = "nullable")]
    pub favers: i64,
}

/// Metadata for one published version of a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Version {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub homepage: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub version_normalized: String,
    /// SPDX license identifiers
    #[serde(deserialize_with = "nullable")]
    pub license: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub authors: Vec<HashMap<String, String>>,
    /// VCS reference: `type`, `url`, `reference`
    #[serde(deserialize_with = "nullable")]
    pub source: HashMap<String, String>,
    /// Archive reference: `type`, `url`, `reference`, `shasum`
    #[serde(deserialize_with = "nullable")]
    pub dist: HashMap<String, String>,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub version_type: String,
    #[serde(deserialize_with = "nullable")]
    pub time: String,
    /// Autoload rules, e.g. `psr-4` -> namespace prefix -> path
    #[serde(deserialize_with = "nullable")]
    pub autoload: HashMap<String, HashMap<String, String>>,
    #[serde(deserialize_with = "nullable")]
    pub require: HashMap<String, String>,
    #[serde(rename = "require-dev", deserialize_with = "nullable")]
    pub require_dev: HashMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub suggest: HashMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub extra: HashMap<String, HashMap<String, String>>,
}

/// Treat an explicit JSON `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: PackageResult = serde_json::from_value(json!({
            "package": { "name": "acme/empty" }
        }))
        .unwrap();

        assert_eq!(result.package.name, "acme/empty");
        assert_eq!(result.package.description, "");
        assert!(result.package.versions.is_empty());
        assert!(result.package.downloads.is_empty());
        assert_eq!(result.package.favers, 0);
    }

    #[test]
    fn test_empty_object_decodes_to_default() {
        let list: PackageListResult = serde_json::from_str("{}").unwrap();
        assert_eq!(list, PackageListResult::default());

        let result: PackageResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, PackageResult::default());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let result: PackageResult = serde_json::from_value(json!({
            "package": {
                "name": "acme/nulls",
                "description": null,
                "favers": null,
                "versions": {
                    "1.0.0": {
                        "name": "acme/nulls",
                        "dist": null,
                        "license": null,
                        "require-dev": null
                    }
                }
            }
        }))
        .unwrap();

        let version = &result.package.versions["1.0.0"];
        assert_eq!(result.package.description, "");
        assert_eq!(result.package.favers, 0);
        assert!(version.dist.is_empty());
        assert!(version.license.is_empty());
        assert!(version.require_dev.is_empty());
    }

    #[test]
    fn test_download_alias() {
        let package: Package = serde_json::from_value(json!({
            "download": { "total": 13 }
        }))
        .unwrap();
        assert_eq!(package.downloads.get("total"), Some(&13));

        let package: Package = serde_json::from_value(json!({
            "downloads": { "total": 13, "monthly": 2, "daily": 0 }
        }))
        .unwrap();
        assert_eq!(package.downloads.get("monthly"), Some(&2));
    }

    #[test]
    fn test_renamed_fields() {
        let version: Version = serde_json::from_value(json!({
            "type": "library",
            "require-dev": { "phpunit/phpunit": "^9.0" },
            "autoload": { "psr-4": { "Acme\\": "src/" } }
        }))
        .unwrap();

        assert_eq!(version.version_type, "library");
        assert_eq!(version.require_dev["phpunit/phpunit"], "^9.0");
        assert_eq!(version.autoload["psr-4"]["Acme\\"], "src/");

        let value = serde_json::to_value(&version).unwrap();
        assert_eq!(value["type"], "library");
        assert_eq!(value["require-dev"]["phpunit/phpunit"], "^9.0");
    }

    #[test]
    fn test_package_names_keep_server_order() {
        let list: PackageListResult = serde_json::from_value(json!({
            "packageNames": ["zeta/last", "alpha/first", "mid/middle"]
        }))
        .unwrap();
        assert_eq!(list.package_names, vec!["zeta/last", "alpha/first", "mid/middle"]);
    }

    #[test]
    fn test_counts_are_signed() {
        let package: Package = serde_json::from_value(json!({
            "favers": -1,
            "downloads": { "total": -5 }
        }))
        .unwrap();
        assert_eq!(package.favers, -1);
        assert_eq!(package.downloads["total"], -5);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result = serde_json::from_value::<PackageListResult>(json!({
            "packageNames": "not-a-list"
        }));
        assert!(result.is_err());
    }
}
