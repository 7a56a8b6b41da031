// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;

/// Inspector rules packages published for a region. Field names double as
/// the second level keys of the `InspectorRulesPackages` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RulesPackages {
    pub cve: String,
    pub cis: String,
    pub network_reachability: String,
    pub security_best_practices: String,
}

pub const CVE: &str = "Cve";
pub const CIS: &str = "Cis";
pub const NETWORK_REACHABILITY: &str = "NetworkReachability";
pub const SECURITY_BEST_PRACTICES: &str = "SecurityBestPractices";

impl RulesPackages {
    fn new(region: &str, account: &str, ids: [&str; 4]) -> Self {
        let arn = |id: &str| format!("arn:aws:inspector:{}:{}:rulespackage/{}", region, account, id);
        RulesPackages {
            cve: arn(ids[0]),
            cis: arn(ids[1]),
            network_reachability: arn(ids[2]),
            security_best_practices: arn(ids[3]),
        }
    }
}

lazy_static! {
    static ref RULES_PACKAGES: IndexMap<&'static str, RulesPackages> = {
        let mut packages = IndexMap::new();
        packages.insert(
            "us-east-1",
            RulesPackages::new(
                "us-east-1",
                "316112463485",
                ["0-gEjTy7T7", "0-rExsr2X8", "0-PmNV0Tcd", "0-R01qwB5Q"],
            ),
        );
        packages.insert(
            "us-east-2",
            RulesPackages::new(
                "us-east-2",
                "646659390643",
                ["0-JnA8Zp85", "0-m8r61nnh", "0-cE4kTR30", "0-AxKmMHPX"],
            ),
        );
        packages.insert(
            "us-west-1",
            RulesPackages::new(
                "us-west-1",
                "166987590008",
                ["0-TKgzoVOa", "0-xUY8iRqX", "0-TxmXimXF", "0-byoQRFYm"],
            ),
        );
        packages.insert(
            "us-west-2",
            RulesPackages::new(
                "us-west-2",
                "758058086616",
                ["0-9hgA516p", "0-H5hpSawc", "0-rD1z6dpl", "0-JJOtZiqQ"],
            ),
        );
        packages
    };
}

pub fn rules_packages(region: &str) -> Option<&'static RulesPackages> {
    RULES_PACKAGES.get(region)
}

pub fn supported_regions() -> impl Iterator<Item = &'static str> {
    RULES_PACKAGES.keys().copied()
}

pub(crate) fn all_rules_packages() -> &'static IndexMap<&'static str, RulesPackages> {
    &RULES_PACKAGES
}
