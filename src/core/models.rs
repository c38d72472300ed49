use serde::{
    Deserialize,
    Serialize,
};

/// A link from a term to a term of another category, e.g. a board's mediums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub identifier: String,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub identifier: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Term {
    pub fn new(identifier: &str, code: &str, name: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            index: None,
            category: None,
            associations: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn associate(mut self, category: &str, child: &Term) -> Self {
        self.associations.push(Association {
            identifier: child.identifier.clone(),
            code: child.code.clone(),
            name: child.name.clone(),
            category: category.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkCategory {
    pub code: String,
    #[serde(default)]
    pub terms: Vec<Term>,
}

/// One framework listed on a channel. The board dropdown is built from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOption {
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkSelection {
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub medium: Vec<String>,
    #[serde(default)]
    pub grade_level: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub framework: FrameworkSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserBody {
    pub identifier: String,
    pub name: String,
    pub framework: FrameworkSelection,
}

/// Payload of the update-user call: `{ "request": { identifier, name, framework } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub request: UpdateUserBody,
}

/// Filters the content library applies after a preference change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryFilters {
    pub board: Vec<String>,
    pub medium: Vec<String>,
    pub grade_level: Vec<String>,
    pub applied_filters: bool,
}

impl LibraryFilters {
    pub fn from_selection(selection: &FrameworkSelection) -> Self {
        Self {
            board: vec![selection.board.clone()],
            medium: selection.medium.clone(),
            grade_level: selection.grade_level.clone(),
            applied_filters: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_preference_wire_names() {
        let pref: UserPreference = serde_json::from_value(json!({
            "_id": "u-1",
            "name": "guest",
            "framework": {
                "board": "NCERT",
                "medium": ["English"],
                "gradeLevel": ["Class 1"],
                "subjects": []
            }
        }))
        .unwrap();

        assert_eq!(pref.id, "u-1");
        assert_eq!(pref.framework.grade_level, vec!["Class 1".to_string()]);

        let back = serde_json::to_value(&pref).unwrap();
        assert_eq!(back["framework"]["gradeLevel"], json!(["Class 1"]));
        assert_eq!(back["_id"], json!("u-1"));
    }

    #[test]
    fn test_library_filters_wrap_board() {
        let selection = FrameworkSelection {
            board: "CBSE".to_string(),
            medium: vec!["Hindi".to_string()],
            grade_level: vec!["Class 2".to_string()],
            subjects: vec!["Maths".to_string()],
        };
        let filters = LibraryFilters::from_selection(&selection);

        assert_eq!(filters.board, vec!["CBSE".to_string()]);
        assert!(filters.applied_filters);
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value["appliedFilters"], json!(true));
        assert!(value.get("subjects").is_none());
    }

    #[test]
    fn test_term_tolerates_missing_optional_fields() {
        let term: Term = serde_json::from_value(json!({
            "identifier": "ncert_k-12_medium_english",
            "code": "english",
            "name": "English"
        }))
        .unwrap();
        assert!(term.associations.is_empty());
        assert_eq!(term.index, None);
    }
}
