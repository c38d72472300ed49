use crate::core::{
    BoardOption,
    FrameworkSelection,
    Term,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Board,
    Medium,
    Class,
    Subjects,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Board, Field::Medium, Field::Class, Field::Subjects];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Board => "Board",
            Field::Medium => "Medium",
            Field::Class => "Class",
            Field::Subjects => "Subjects",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Subjects)
    }

    /// Fields that depend on this one, nearest first.
    pub fn descendants(&self) -> &'static [Field] {
        match self {
            Field::Board => &[Field::Medium, Field::Class, Field::Subjects],
            Field::Medium => &[Field::Class, Field::Subjects],
            Field::Class => &[Field::Subjects],
            Field::Subjects => &[],
        }
    }
}

/// Current selections of the preference editor.
///
/// A field is only non-empty while its parent is non-empty: parents clear
/// their descendants through [`PreferenceForm::clear_descendants`] before new
/// options are offered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceForm {
    pub board: Option<BoardOption>,
    pub medium: Vec<Term>,
    pub class: Vec<Term>,
    pub subjects: Vec<Term>,
}

impl PreferenceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self, field: Field) -> bool {
        match field {
            Field::Board => self.board.is_none(),
            Field::Medium => self.medium.is_empty(),
            Field::Class => self.class.is_empty(),
            Field::Subjects => self.subjects.is_empty(),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Board => self.board = None,
            Field::Medium => self.medium.clear(),
            Field::Class => self.class.clear(),
            Field::Subjects => self.subjects.clear(),
        }
    }

    pub fn clear_descendants(&mut self, field: Field) {
        for child in field.descendants() {
            self.clear(*child);
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| f.is_required() && self.is_empty(*f)).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn selection(&self) -> FrameworkSelection {
        FrameworkSelection {
            board: self.board.as_ref().map(|b| b.name.clone()).unwrap_or_default(),
            medium: names(&self.medium),
            grade_level: names(&self.class),
            subjects: names(&self.subjects),
        }
    }
}

fn names(terms: &[Term]) -> Vec<String> {
    terms.iter().map(|t| t.name.clone()).collect()
}
