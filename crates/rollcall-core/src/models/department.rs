//! Department work: non-event hours credited to students.

use serde::{Deserialize, Serialize};

/// Organizational team a piece of department work is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Tech,
    #[serde(rename = "SM")]
    SocialMedia,
    Design,
    Content,
    #[serde(rename = "PR")]
    PublicRelations,
    #[serde(rename = "Logi")]
    Logistics,
    Miscellaneous,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Tech,
        Department::SocialMedia,
        Department::Design,
        Department::Content,
        Department::PublicRelations,
        Department::Logistics,
        Department::Miscellaneous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Department::Tech => "Tech",
            Department::SocialMedia => "SM",
            Department::Design => "Design",
            Department::Content => "Content",
            Department::PublicRelations => "PR",
            Department::Logistics => "Logi",
            Department::Miscellaneous => "Miscellaneous",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|d| d.label() == label)
    }

    /// Next department in display order (wrapping around)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous department in display order (wrapping around)
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded piece of department work for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWorkEntry {
    pub id: String,
    pub date: String,
    pub department: Department,
    pub work_description: String,
    pub working_hours: f64,
    pub student_id: String,
    pub student_name: String,
}

/// Outgoing department-work entry, one per selected student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDepartmentWork {
    pub date: String,
    pub department: Department,
    #[serde(rename = "workDescription")]
    pub work_description: String,
    #[serde(rename = "workingHours")]
    pub working_hours: f64,
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_cycle_wraps() {
        assert_eq!(Department::Tech.next(), Department::SocialMedia);
        assert_eq!(Department::Miscellaneous.next(), Department::Tech);
        assert_eq!(Department::Tech.prev(), Department::Miscellaneous);
        assert_eq!(Department::Logistics.prev(), Department::PublicRelations);
    }

    #[test]
    fn test_department_from_label() {
        assert_eq!(Department::from_label("SM"), Some(Department::SocialMedia));
        assert_eq!(Department::from_label("Logi"), Some(Department::Logistics));
        assert_eq!(Department::from_label("Marketing"), None);
    }

    #[test]
    fn test_new_department_work_wire_shape() {
        let entry = NewDepartmentWork {
            date: "2025-03-01T10:00:00.000Z".to_string(),
            department: Department::PublicRelations,
            work_description: "Poster run".to_string(),
            working_hours: 1.5,
            student_id: "s1".to_string(),
            student_name: "Asha".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["department"], "PR");
        assert_eq!(value["workDescription"], "Poster run");
        assert_eq!(value["workingHours"], 1.5);
        assert_eq!(value["studentId"], "s1");
        assert_eq!(value["studentName"], "Asha");
    }
}
