//! Lookups over a framework's category tree.

use std::{
    cmp::Ordering,
    collections::HashSet,
};

use crate::core::{
    BoardOption,
    FrameworkCategory,
    Term,
};

pub const BOARD: &str = "board";
pub const MEDIUM: &str = "medium";
pub const GRADE_LEVEL: &str = "gradeLevel";
pub const SUBJECT: &str = "subject";

/// Anything that can appear in a preference dropdown.
pub trait FilterItem {
    fn name(&self) -> &str;
    fn index(&self) -> Option<i64> {
        None
    }
}

impl FilterItem for Term {
    fn name(&self) -> &str {
        &self.name
    }

    fn index(&self) -> Option<i64> {
        self.index
    }
}

impl FilterItem for BoardOption {
    fn name(&self) -> &str {
        &self.name
    }
}

fn by_index<T: FilterItem>(a: &T, b: &T) -> Ordering {
    match (a.index(), b.index()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders dropdown options: grades follow their curriculum index, everything
/// else is alphabetical. The sort is stable.
pub fn sorted_filters<T: FilterItem>(mut items: Vec<T>, category: &str) -> Vec<T> {
    if category == GRADE_LEVEL {
        items.sort_by(by_index);
    } else {
        items.sort_by(|a, b| a.name().cmp(b.name()));
    }
    items
}

pub fn find_category<'a>(
    categories: &'a [FrameworkCategory],
    code: &str,
) -> Option<&'a FrameworkCategory> {
    categories.iter().find(|c| c.code == code)
}

/// Terms of `child_category` reachable through the associations of `selected`.
///
/// Associations are matched to the child category's terms by code alone, since
/// the backend does not always tag an association with its category. The
/// result is de-duplicated by identifier and ordered by index.
pub fn association_data(
    selected: &[Term],
    child_category: &str,
    categories: &[FrameworkCategory],
) -> Vec<Term> {
    let Some(child) = find_category(categories, child_category) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut result: Vec<Term> = selected
        .iter()
        .flat_map(|term| term.associations.iter())
        .filter_map(|assoc| child.terms.iter().find(|t| t.code == assoc.code))
        .filter(|term| seen.insert(term.identifier.clone()))
        .cloned()
        .collect();

    result.sort_by(by_index);
    result
}

/// Maps stored names back onto option objects, dropping names with no match.
pub fn select_by_names<T: FilterItem + Clone>(options: &[T], names: &[String]) -> Vec<T> {
    names
        .iter()
        .filter_map(|name| options.iter().find(|o| o.name() == name.as_str()))
        .cloned()
        .collect()
}
