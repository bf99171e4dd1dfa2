//! Student roster entries and the fixed set of academic branches.

use serde::{Deserialize, Serialize};

/// Academic program a student belongs to. The roster is partitioned by branch
/// for filtering and bulk selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "CSAI")]
    Csai,
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "CSDS")]
    Csds,
    #[serde(rename = "MAC")]
    Mac,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "ITNS")]
    Itns,
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "EVDT")]
    Evdt,
    #[serde(rename = "EE")]
    Ee,
    #[serde(rename = "ICE")]
    Ice,
    #[serde(rename = "ME")]
    Me,
    #[serde(rename = "BT")]
    Bt,
    #[serde(rename = "BBA")]
    Bba,
    #[serde(rename = "BBA-IEV")]
    BbaIev,
    #[serde(rename = "B-Design")]
    BDesign,
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "Certificate Course 2025")]
    CertificateCourse2025,
    #[serde(rename = "Certificate Course 2024")]
    CertificateCourse2024,
    /// Any label outside the known set. Such students stay on the roster so
    /// their existing marks are kept.
    #[serde(other)]
    Other,
}

impl Branch {
    /// All branches in display order.
    pub const ALL: [Branch; 19] = [
        Branch::Csai,
        Branch::Cse,
        Branch::Csds,
        Branch::Mac,
        Branch::It,
        Branch::Itns,
        Branch::Ece,
        Branch::Evdt,
        Branch::Ee,
        Branch::Ice,
        Branch::Me,
        Branch::Bt,
        Branch::Bba,
        Branch::BbaIev,
        Branch::BDesign,
        Branch::Mba,
        Branch::CertificateCourse2025,
        Branch::CertificateCourse2024,
        Branch::Other,
    ];

    /// The label used on the wire and on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Branch::Csai => "CSAI",
            Branch::Cse => "CSE",
            Branch::Csds => "CSDS",
            Branch::Mac => "MAC",
            Branch::It => "IT",
            Branch::Itns => "ITNS",
            Branch::Ece => "ECE",
            Branch::Evdt => "EVDT",
            Branch::Ee => "EE",
            Branch::Ice => "ICE",
            Branch::Me => "ME",
            Branch::Bt => "BT",
            Branch::Bba => "BBA",
            Branch::BbaIev => "BBA-IEV",
            Branch::BDesign => "B-Design",
            Branch::Mba => "MBA",
            Branch::CertificateCourse2025 => "Certificate Course 2025",
            Branch::CertificateCourse2024 => "Certificate Course 2024",
            Branch::Other => "Other",
        }
    }

    /// Parse a wire label. Matching is exact apart from surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|b| b.label() == label)
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A student as listed in the roster. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Server-side record id; the key for selection and submissions.
    pub id: String,
    /// Human-readable student code.
    pub student_id: String,
    pub name: String,
    pub branch: Branch,
}

impl Student {
    /// Case-insensitive match against name or student code
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.student_id.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_labels_round_trip_through_from_label() {
        for branch in Branch::ALL {
            assert_eq!(Branch::from_label(branch.label()), Some(branch));
        }
    }

    #[test]
    fn test_branch_from_label_rejects_unknown() {
        assert_eq!(Branch::from_label("cse"), None);
        assert_eq!(Branch::from_label(""), None);
        assert_eq!(Branch::from_label("Mechanical"), None);
        assert_eq!(Branch::from_label(" ECE "), Some(Branch::Ece));
    }

    #[test]
    fn test_branch_serde_uses_wire_label() {
        let json = serde_json::to_string(&Branch::BbaIev).unwrap();
        assert_eq!(json, "\"BBA-IEV\"");
        let parsed: Branch = serde_json::from_str("\"Certificate Course 2024\"").unwrap();
        assert_eq!(parsed, Branch::CertificateCourse2024);
        let unknown: Branch = serde_json::from_str("\"Astrophysics\"").unwrap();
        assert_eq!(unknown, Branch::Other);
    }

    #[test]
    fn test_matches_query() {
        let student = Student {
            id: "s1".to_string(),
            student_id: "22CSE104".to_string(),
            name: "Asha Verma".to_string(),
            branch: Branch::Cse,
        };
        assert!(student.matches_query(""));
        assert!(student.matches_query("asha"));
        assert!(student.matches_query("VERMA"));
        assert!(student.matches_query("cse1"));
        assert!(!student.matches_query("ravi"));
    }
}
