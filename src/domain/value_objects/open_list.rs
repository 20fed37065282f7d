//! Open list value object.
//!
//! A subset of a (possibly huge) id universe, represented either by explicit
//! membership or by explicit exclusion from the universe. "Everyone who can
//! see a public post" is all registered users minus a handful of exceptions;
//! materializing that set would be O(total users) per post, so the audience
//! math is done on this closed algebra instead and pushed down to storage as
//! a predicate fragment.

use std::collections::HashSet;
use std::hash::Hash;

use uuid::Uuid;

/// An open or closed set of ids.
///
/// `Finite` holds the members themselves; `Complement` holds everything in
/// the universe *except* the listed ids. The empty set is `Finite(∅)` and
/// the whole universe is `Complement(∅)`; every operation below stays within
/// these two forms, so the universe is never enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenList<T: Eq + Hash> {
    Finite(HashSet<T>),
    Complement(HashSet<T>),
}

impl<T: Eq + Hash + Clone> OpenList<T> {
    /// The empty set.
    pub fn empty() -> Self {
        Self::Finite(HashSet::new())
    }

    /// The whole universe.
    pub fn everything() -> Self {
        Self::Complement(HashSet::new())
    }

    pub fn finite(ids: impl IntoIterator<Item = T>) -> Self {
        Self::Finite(ids.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Finite(ids) if ids.is_empty())
    }

    pub fn is_everything(&self) -> bool {
        matches!(self, Self::Complement(excluded) if excluded.is_empty())
    }

    pub fn contains(&self, id: &T) -> bool {
        match self {
            Self::Finite(ids) => ids.contains(id),
            Self::Complement(excluded) => !excluded.contains(id),
        }
    }

    /// Set union.
    pub fn union(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.union(b).cloned().collect()),
            (Self::Finite(a), Self::Complement(e)) | (Self::Complement(e), Self::Finite(a)) => {
                Self::Complement(e.difference(a).cloned().collect())
            }
            (Self::Complement(e1), Self::Complement(e2)) => {
                Self::Complement(e1.intersection(e2).cloned().collect())
            }
        }
    }

    /// Set intersection.
    pub fn intersection(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => {
                Self::Finite(a.intersection(b).cloned().collect())
            }
            (Self::Finite(a), Self::Complement(e)) | (Self::Complement(e), Self::Finite(a)) => {
                Self::Finite(a.difference(e).cloned().collect())
            }
            (Self::Complement(e1), Self::Complement(e2)) => {
                Self::Complement(e1.union(e2).cloned().collect())
            }
        }
    }

    /// Set difference: everything in `self` that is not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.intersection(&other.inverse())
    }

    /// Complement within the universe.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Finite(ids) => Self::Complement(ids.clone()),
            Self::Complement(excluded) => Self::Finite(excluded.clone()),
        }
    }

    /// Translate to a storage predicate so bulk queries can filter on the
    /// set without it being enumerated here.
    pub fn to_predicate(&self) -> IdPredicate<T> {
        match self {
            Self::Finite(ids) if ids.is_empty() => IdPredicate::AlwaysFalse,
            Self::Finite(ids) => IdPredicate::AnyOf(ids.iter().cloned().collect()),
            Self::Complement(excluded) if excluded.is_empty() => IdPredicate::AlwaysTrue,
            Self::Complement(excluded) => {
                IdPredicate::NoneOf(excluded.iter().cloned().collect())
            }
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OpenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Finite(iter.into_iter().collect())
    }
}

/// Storage predicate fragment derived from an [`OpenList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPredicate<T> {
    AlwaysTrue,
    AlwaysFalse,
    AnyOf(Vec<T>),
    NoneOf(Vec<T>),
}

impl IdPredicate<Uuid> {
    /// Render as a SQL condition over the given uuid column.
    pub fn to_sql(&self, column: &str) -> String {
        let quote = |ids: &[Uuid]| {
            ids.iter()
                .map(|id| format!("'{id}'"))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            Self::AlwaysTrue => "true".to_string(),
            Self::AlwaysFalse => "false".to_string(),
            Self::AnyOf(ids) => format!("{column} = any(array[{}]::uuid[])", quote(ids)),
            Self::NoneOf(ids) => {
                format!("not ({column} = any(array[{}]::uuid[]))", quote(ids))
            }
        }
    }
}
