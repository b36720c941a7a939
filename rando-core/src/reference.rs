//! Normalized reference entities and id-keyed lookup collections.
//!
//! Raw trek payloads refer to difficulties, themes, practices and similar
//! entities by numeric id. A [`ReferenceCollection`] holds one kind of
//! entity keyed by id, and resolves those references: a hit yields a copy of
//! the entity, a miss yields nothing.

use std::collections::BTreeMap;

use crate::Coordinate;

/// Entities addressable by a numeric id.
pub trait Identified {
    /// The entity's id.
    fn id(&self) -> u32;
}

macro_rules! pictogram_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            /// Upstream id.
            pub id: u32,
            /// Display label.
            pub label: String,
            /// Pictogram URL, when upstream provides one.
            pub pictogram_uri: Option<String>,
        }

        impl $name {
            /// Construct an entry without a pictogram.
            pub fn new(id: u32, label: impl Into<String>) -> Self {
                Self {
                    id,
                    label: label.into(),
                    pictogram_uri: None,
                }
            }

            /// Attach a pictogram URL.
            #[must_use]
            pub fn with_pictogram(mut self, uri: impl Into<String>) -> Self {
                self.pictogram_uri = Some(uri.into());
                self
            }
        }

        impl Identified for $name {
            fn id(&self) -> u32 {
                self.id
            }
        }
    };
}

pictogram_entity!(
    /// Trek difficulty level.
    Difficulty
);
pictogram_entity!(
    /// Thematic tag, such as fauna or heritage.
    Theme
);
pictogram_entity!(
    /// Practice, such as hiking or cycling.
    Activity
);
pictogram_entity!(
    /// Route shape: loop, return trip, crossing.
    CourseType
);
pictogram_entity!(
    /// Waymarking network.
    Network
);
pictogram_entity!(Accessibility);

/// Organisation a trek's data originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    /// Upstream id.
    pub id: u32,
    /// Organisation name.
    pub name: String,
    /// Organisation website.
    pub website: Option<String>,
    /// Logo URL.
    pub pictogram_uri: Option<String>,
}

/// Visitor centre or tourist office.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InformationDesk {
    /// Upstream id.
    pub id: u32,
    /// Desk name.
    pub name: String,
    /// Free-form HTML description.
    pub description: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact address.
    pub email: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Photo URL.
    pub photo_url: Option<String>,
    /// Postal address.
    pub street: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Municipality.
    pub municipality: Option<String>,
    /// Position, when the desk is geolocated.
    pub location: Option<Coordinate>,
}

/// Quality label or warning attached to a trek.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Upstream id.
    pub id: u32,
    /// Label name.
    pub name: String,
    /// HTML advice attached to the label.
    pub advice: Option<String>,
    /// Pictogram URL.
    pub pictogram_uri: Option<String>,
}

impl Identified for Source {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for InformationDesk {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for Label {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Lookup table of one reference kind, keyed by id.
///
/// # Examples
/// ```
/// use rando_core::{Difficulty, ReferenceCollection};
///
/// let difficulties: ReferenceCollection<Difficulty> =
///     [Difficulty::new(1, "Easy"), Difficulty::new(3, "Hard")].into_iter().collect();
///
/// assert_eq!(difficulties.resolve(Some(3)).map(|d| d.label), Some("Hard".into()));
/// assert!(difficulties.resolve(Some(7)).is_none());
/// assert_eq!(difficulties.resolve_all(&[7, 1]).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCollection<T> {
    entries: BTreeMap<u32, T>,
}

impl<T> Default for ReferenceCollection<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Identified> FromIterator<T> for ReferenceCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|entry| (entry.id(), entry)).collect(),
        }
    }
}

impl<T> ReferenceCollection<T> {
    /// An empty collection, as used when a reference fetch degrades.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Entry with id `id`.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Ids in `ids` that the collection cannot resolve, in input order.
    pub fn missing(&self, ids: &[u32]) -> Vec<u32> {
        ids.iter()
            .copied()
            .filter(|id| !self.entries.contains_key(id))
            .collect()
    }
}

impl<T: Clone> ReferenceCollection<T> {
    /// Resolve an optional singular reference.
    pub fn resolve(&self, id: Option<u32>) -> Option<T> {
        id.and_then(|id| self.entries.get(&id)).cloned()
    }

    /// Resolve a list of references, skipping ids without an entry.
    pub fn resolve_all(&self, ids: &[u32]) -> Vec<T> {
        ids.iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn themes() -> ReferenceCollection<Theme> {
        [
            Theme::new(4, "Fauna"),
            Theme::new(7, "Lakes").with_pictogram("https://example.test/lakes.svg"),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn resolve_copies_hit(themes: ReferenceCollection<Theme>) {
        let theme = themes.resolve(Some(7)).expect("theme 7");
        assert_eq!(theme.label, "Lakes");
        assert!(theme.pictogram_uri.is_some());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(99))]
    fn resolve_misses_yield_none(themes: ReferenceCollection<Theme>, #[case] id: Option<u32>) {
        assert!(themes.resolve(id).is_none());
    }

    #[rstest]
    fn resolve_all_skips_unknown_and_keeps_order(themes: ReferenceCollection<Theme>) {
        let labels: Vec<_> = themes
            .resolve_all(&[7, 99, 4])
            .into_iter()
            .map(|theme| theme.label)
            .collect();
        assert_eq!(labels, vec!["Lakes", "Fauna"]);
        assert_eq!(themes.missing(&[7, 99, 4]), vec![99]);
    }

    #[rstest]
    fn later_duplicate_ids_win() {
        let collection: ReferenceCollection<Difficulty> =
            [Difficulty::new(1, "Old"), Difficulty::new(1, "New")]
                .into_iter()
                .collect();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(1).map(|d| d.label.as_str()), Some("New"));
    }
}
