//! # services
//!
//! Resolves procurement and service codes to organization names and summarizes
//! which service manages an item and which services use it.
//!
//! Two code tables are kept on purpose. `PICA_SERVICE_MAP` uses the phrasing of
//! the item-managing authority, `SERVICE_CODE_MAP` the general service phrasing.
//! They disagree on a few keys (D, YP, ZA, YY) and only the latter knows SX.

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};

/// A flat record as returned under the `records` key of an API response.
pub type Record = Map<String, Value>;

/// Immutable mapping from service code to display name.
#[derive(Debug)]
pub struct CodeTable {
    entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    /// Returns the display name for code, or the code itself when the table
    /// has no entry for it.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, name)| *name)
            .unwrap_or(code)
    }
}

/// Managing-authority names, used when listing managing services.
pub static PICA_SERVICE_MAP: CodeTable = CodeTable {
    entries: &[
        ("A",  "Army"),
        ("N",  "Navy"),
        ("F",  "Air Force"),
        ("M",  "Marine Corps"),
        ("C",  "Coast Guard"),
        ("D",  "Defense Logistics Agency (DLA)"),
        ("GX", "DLA Land & Maritime"),
        ("GH", "DLA Aviation"),
        ("BF", "DLA Troop Support"),
        ("PA", "DLA Troop Support - Philadelphia"),
        ("CD", "DLA Aviation (Columbus)"),
        ("YP", "Foreign Military Sales (FMS) or NATO"),
        ("ZA", "Commercial Item/NATO"),
        ("ZH", "GSA"),
        ("ZW", "Service not otherwise listed"),
        ("YY", "Special program use"),
        ("ZB", "GSA"),
        ("ZN", "NATO (non-US)"),
        ("ZU", "Obsolete/Discontinued"),
        ("ZC", "Classified Item"),
    ],
};

/// General service names, used for ownership analysis and part summaries.
pub static SERVICE_CODE_MAP: CodeTable = CodeTable {
    entries: &[
        ("A",  "Army"),
        ("F",  "Air Force"),
        ("N",  "Navy"),
        ("M",  "Marine Corps"),
        ("C",  "Coast Guard"),
        ("D",  "DLA"),
        ("GX", "DLA Land & Maritime"),
        ("GH", "DLA Aviation"),
        ("BF", "DLA Troop Support"),
        ("PA", "DLA Troop Support - Philadelphia"),
        ("CD", "DLA Aviation (Columbus)"),
        ("SX", "Air Force"),
        ("YP", "Foreign Military Sales (FMS)"),
        ("ZA", "NATO/Commercial"),
        ("ZH", "GSA"),
        ("ZW", "Service not otherwise listed"),
        ("YY", "Special Program Use"),
        ("ZB", "GSA"),
        ("ZN", "NATO (non-US)"),
        ("ZU", "Obsolete/Discontinued"),
        ("ZC", "Classified Item"),
    ],
};

/// Looks up code in table. Unknown codes come back unchanged.
pub fn resolve_code<'a>(code: &'a str, table: &CodeTable) -> &'a str {
    table.resolve(code)
}

/// One MOE_RULE line reduced to the fields that carry service codes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OwnershipRecord {
    pub pica:        String,
    pub sica:        String,
    pub imca:        String,
    pub auth_rcvr:   String,
    pub auth_collab: String,
}

impl OwnershipRecord {
    /// Pulls the code fields out of a raw record.
    /// Missing fields and non-string values are read as empty.
    pub fn from_record(record: &Record) -> Self {
        let field = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        Self {
            pica:        field("PICA"),
            sica:        field("SICA"),
            imca:        field("IMCA"),
            auth_rcvr:   field("AUTH_RCVR"),
            auth_collab: field("AUTH_COLLAB"),
        }
    }

    /// Every code this record names for a using service.
    fn user_codes(&self) -> impl Iterator<Item = &str> {
        let single = [self.sica.trim(), self.imca.trim()]
            .into_iter()
            .filter(|c| !c.is_empty());
        let lists = self
            .auth_rcvr
            .split_whitespace()
            .chain(self.auth_collab.split_whitespace());

        single.chain(lists)
    }
}

/// Managing service and using services derived from a set of MOE_RULE records.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnershipSummary {
    pub managing_service: String,
    pub user_services:    Vec<String>,
}

/// Placeholder for a summary without any PICA.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Returns the first non-empty PICA in input order.
pub fn first_pica(records: &[OwnershipRecord]) -> Option<&str> {
    records
        .iter()
        .map(|r| r.pica.as_str())
        .find(|pica| !pica.is_empty())
}

/// Lists the managing services named by PICA across records.
///
/// Deduplicates by raw code and keeps input order, resolving against
/// `PICA_SERVICE_MAP`.
pub fn list_managing_services(records: &[OwnershipRecord]) -> Vec<String> {
    let mut services = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        let pica = record.pica.as_str();
        if !pica.is_empty() && seen.insert(pica) {
            services.push(resolve_code(pica, &PICA_SERVICE_MAP).to_string());
        }
    }

    services
}

/// Works out which service manages an item and which services use it.
///
/// The managing service is the first non-empty PICA. User services come from
/// SICA, IMCA, AUTH_RCVR and AUTH_COLLAB, ordered by raw code, with repeated
/// display names dropped. Both resolve against `SERVICE_CODE_MAP`.
pub fn analyze_ownership(records: &[OwnershipRecord]) -> OwnershipSummary {
    let managing_service = first_pica(records)
        .map(|pica| resolve_code(pica, &SERVICE_CODE_MAP))
        .unwrap_or(UNKNOWN_SERVICE)
        .to_string();

    // BTreeSet gives the lexicographic order of the raw codes
    let user_codes: BTreeSet<&str> = records.iter().flat_map(OwnershipRecord::user_codes).collect();

    let mut user_services: Vec<String> = Vec::new();
    for code in user_codes {
        let name = resolve_code(code, &SERVICE_CODE_MAP);
        if !user_services.iter().any(|s| s == name) {
            user_services.push(name.to_string());
        }
    }

    OwnershipSummary { managing_service, user_services }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<OwnershipRecord> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| OwnershipRecord::from_record(v.as_object().unwrap()))
            .collect()
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(resolve_code("A", &SERVICE_CODE_MAP), "Army");
        assert_eq!(resolve_code("GX", &PICA_SERVICE_MAP), "DLA Land & Maritime");
        assert_eq!(resolve_code("QQ", &SERVICE_CODE_MAP), "QQ");
        assert_eq!(resolve_code("QQ", &PICA_SERVICE_MAP), "QQ");
        assert_eq!(resolve_code("", &SERVICE_CODE_MAP), "");
        // Case matters
        assert_eq!(resolve_code("a", &SERVICE_CODE_MAP), "a");
    }

    #[test]
    fn test_tables_stay_distinct() {
        assert_eq!(PICA_SERVICE_MAP.resolve("D"), "Defense Logistics Agency (DLA)");
        assert_eq!(SERVICE_CODE_MAP.resolve("D"), "DLA");
        assert_eq!(PICA_SERVICE_MAP.resolve("YP"), "Foreign Military Sales (FMS) or NATO");
        assert_eq!(SERVICE_CODE_MAP.resolve("YP"), "Foreign Military Sales (FMS)");
        assert_eq!(PICA_SERVICE_MAP.resolve("ZA"), "Commercial Item/NATO");
        assert_eq!(SERVICE_CODE_MAP.resolve("ZA"), "NATO/Commercial");

        assert_eq!(SERVICE_CODE_MAP.resolve("SX"), "Air Force");
        assert_eq!(PICA_SERVICE_MAP.resolve("SX"), "SX");
    }

    #[test]
    fn test_every_entry_resolves_to_its_name() {
        for table in [&PICA_SERVICE_MAP, &SERVICE_CODE_MAP] {
            for (code, name) in table.entries {
                assert_eq!(table.resolve(code), *name);
            }
        }
    }

    #[test]
    fn test_list_managing_services_dedups_by_code() {
        let r = records(json!([{"PICA": "A"}, {"PICA": "A"}, {"PICA": "N"}]));
        assert_eq!(list_managing_services(&r), vec!["Army", "Navy"]);

        // ZH and ZB both read GSA but are different codes
        let r = records(json!([{"PICA": "ZH"}, {"PICA": ""}, {"PICA": "ZB"}, {}]));
        assert_eq!(list_managing_services(&r), vec!["GSA", "GSA"]);

        assert!(list_managing_services(&[]).is_empty());
    }

    #[test]
    fn test_analyze_ownership_basic() {
        let r = records(json!([{"PICA": "A", "SICA": "N", "AUTH_RCVR": "F M"}]));
        let summary = analyze_ownership(&r);

        assert_eq!(summary.managing_service, "Army");
        assert_eq!(summary.user_services, vec!["Air Force", "Marine Corps", "Navy"]);
    }

    #[test]
    fn test_analyze_ownership_empty() {
        let summary = analyze_ownership(&[]);
        assert_eq!(summary, OwnershipSummary {
            managing_service: String::from("Unknown"),
            user_services: Vec::new(),
        });
    }

    #[test]
    fn test_analyze_ownership_first_pica_wins() {
        let r = records(json!([
            {"PICA": "", "SICA": "A"},
            {"PICA": "D"},
            {"PICA": "N"},
        ]));
        let summary = analyze_ownership(&r);

        assert_eq!(summary.managing_service, "DLA");
        assert_eq!(summary.user_services, vec!["Army"]);
    }

    #[test]
    fn test_analyze_ownership_dedups_by_name() {
        // F and SX both resolve to Air Force; F sorts first
        let r = records(json!([
            {"PICA": "SX", "IMCA": " SX ", "AUTH_COLLAB": "ZH  F"},
            {"AUTH_RCVR": "ZB F", "SICA": "QQ"},
        ]));
        let summary = analyze_ownership(&r);

        assert_eq!(summary.managing_service, "Air Force");
        assert_eq!(summary.user_services, vec!["Air Force", "QQ", "GSA"]);

        // Same codes through the managing-service list are kept apart
        let r = records(json!([{"PICA": "ZH"}, {"PICA": "ZB"}]));
        assert_eq!(list_managing_services(&r).len(), 2);
    }

    #[test]
    fn test_record_with_non_string_fields() {
        let r = records(json!([{"PICA": null, "SICA": 7, "AUTH_RCVR": ["A"]}]));
        assert_eq!(r[0], OwnershipRecord::default());

        let summary = analyze_ownership(&r);
        assert_eq!(summary.managing_service, UNKNOWN_SERVICE);
        assert!(summary.user_services.is_empty());
    }

    #[test]
    fn test_unknown_pica_passes_through() {
        let r = records(json!([{"PICA": "XY"}]));
        assert_eq!(analyze_ownership(&r).managing_service, "XY");
        assert_eq!(list_managing_services(&r), vec!["XY"]);
    }
}
