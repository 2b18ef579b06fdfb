use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Technology areas inferred from issue text.
///
/// A tag applies when any of its trigger substrings appears in the
/// lower-cased title + body. Unlike [`super::Category`], tags are not
/// mutually exclusive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TechTag {
    Kubernetes,
    Docker,
    Mysql,
    Cloud,
    Monitoring,
    Backup,
    Replication,
    Performance,
    Tiflash,
    Tikv,
    Pd,
    Cdc,
}

impl TechTag {
    /// All tags in fixed enumeration order. This order breaks count ties
    /// in usage rankings.
    pub const ALL: [TechTag; 12] = [
        TechTag::Kubernetes,
        TechTag::Docker,
        TechTag::Mysql,
        TechTag::Cloud,
        TechTag::Monitoring,
        TechTag::Backup,
        TechTag::Replication,
        TechTag::Performance,
        TechTag::Tiflash,
        TechTag::Tikv,
        TechTag::Pd,
        TechTag::Cdc,
    ];

    /// Trigger substrings for this tag.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            TechTag::Kubernetes => &["kubernetes", "k8s", "kubectl", "pod", "namespace", "helm"],
            TechTag::Docker => &["docker", "container", "dockerfile", "image"],
            TechTag::Mysql => &["mysql", "mariadb", "migration", "compatibility"],
            TechTag::Cloud => &["aws", "azure", "gcp", "cloud", "s3", "ec2"],
            TechTag::Monitoring => &["prometheus", "grafana", "monitoring", "metrics", "alerting"],
            TechTag::Backup => &["backup", "restore", "br", "dumpling"],
            TechTag::Replication => &["replication", "replica", "sync", "binlog"],
            TechTag::Performance => {
                &["slow", "performance", "optimization", "latency", "bottleneck"]
            }
            TechTag::Tiflash => &["tiflash", "columnar", "analytical"],
            TechTag::Tikv => &["tikv", "storage", "raftstore"],
            TechTag::Pd => &["pd", "placement driver", "scheduler"],
            TechTag::Cdc => &["cdc", "change data capture", "ticdc"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TechTag::Kubernetes => "kubernetes",
            TechTag::Docker => "docker",
            TechTag::Mysql => "mysql",
            TechTag::Cloud => "cloud",
            TechTag::Monitoring => "monitoring",
            TechTag::Backup => "backup",
            TechTag::Replication => "replication",
            TechTag::Performance => "performance",
            TechTag::Tiflash => "tiflash",
            TechTag::Tikv => "tikv",
            TechTag::Pd => "pd",
            TechTag::Cdc => "cdc",
        }
    }

    /// Parse a tag name as written in snapshot files.
    pub fn parse(name: &str) -> Option<TechTag> {
        TechTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == name.to_lowercase())
    }
}

impl fmt::Display for TechTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for tag in TechTag::ALL {
            assert_eq!(TechTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(TechTag::parse("Kubernetes"), Some(TechTag::Kubernetes));
        assert_eq!(TechTag::parse("fortran"), None);
    }
}
