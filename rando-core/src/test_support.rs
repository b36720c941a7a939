//! Sample catalogues and reference collections used by unit and behaviour
//! tests.

use crate::{Activity, Difficulty, FilterCategory, FilterOption, ReferenceCollection, Theme};

/// A difficulty category with three levels.
pub fn difficulty_category() -> FilterCategory {
    FilterCategory::new(
        "difficulty",
        "Difficulty",
        vec![
            FilterOption::new("1", "Easy"),
            FilterOption::new("2", "Medium"),
            FilterOption::new("3", "Hard"),
        ],
    )
}

/// A themes category with three themes.
pub fn themes_category() -> FilterCategory {
    FilterCategory::new(
        "themes",
        "Themes",
        vec![
            FilterOption::new("4", "Fauna"),
            FilterOption::new("7", "Lakes"),
            FilterOption::new("9", "Heritage"),
        ],
    )
}

/// A practice category.
pub fn practices_category() -> FilterCategory {
    FilterCategory::new(
        "practices",
        "Practices",
        vec![
            FilterOption::new("1", "Hiking"),
            FilterOption::new("2", "Cycling"),
        ],
    )
}

/// Every sample category in display order.
pub fn sample_catalogue() -> Vec<FilterCategory> {
    vec![
        difficulty_category(),
        themes_category(),
        practices_category(),
    ]
}

/// Difficulties matching [`difficulty_category`] plus an expert level.
pub fn sample_difficulties() -> ReferenceCollection<Difficulty> {
    [
        Difficulty::new(1, "Easy"),
        Difficulty::new(2, "Medium"),
        Difficulty::new(3, "Hard"),
        Difficulty::new(7, "Expert"),
    ]
    .into_iter()
    .collect()
}

/// Themes matching [`themes_category`].
pub fn sample_themes() -> ReferenceCollection<Theme> {
    [
        Theme::new(4, "Fauna"),
        Theme::new(7, "Lakes"),
        Theme::new(9, "Heritage"),
    ]
    .into_iter()
    .collect()
}

/// Practices matching [`practices_category`].
pub fn sample_activities() -> ReferenceCollection<Activity> {
    [Activity::new(1, "Hiking"), Activity::new(2, "Cycling")]
        .into_iter()
        .collect()
}
