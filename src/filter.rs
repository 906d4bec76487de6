//! Filter state: which categories narrow the discovery candidate set.
//!
//! A [`FilterSelection`] constrains at most two axes: pet type and purpose.
//! `None` on an axis means "no constraint" (the UI's "All").  Categories are
//! a closed tagged variant, so an axis can only ever hold a value of its own
//! kind.

use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationErrors};
use crate::model::{PetListing, PetType, Purpose};

/// Label the presentation layer uses for "no constraint on this axis".
pub const ALL_LABEL: &str = "All";

/// One clickable category on the explore screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PetType(PetType),
    Purpose(Purpose),
}

impl Category {
    /// Every category, in explore-screen order.
    pub fn all() -> impl Iterator<Item = Self> {
        PetType::ALL
            .into_iter()
            .map(Self::PetType)
            .chain(Purpose::ALL.into_iter().map(Self::Purpose))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PetType(t) => t.label(),
            Self::Purpose(p) => p.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<PetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Purpose>,
}

impl FilterSelection {
    pub const NONE: Self = Self {
        pet_type: None,
        purpose: None,
    };

    pub fn pet_type(pet_type: PetType) -> Self {
        Self {
            pet_type: Some(pet_type),
            purpose: None,
        }
    }

    pub fn purpose(purpose: Purpose) -> Self {
        Self {
            pet_type: None,
            purpose: Some(purpose),
        }
    }

    /// Parse presentation labels.  Absent or `"All"` leaves an axis open;
    /// any other unknown label is a validation error.
    pub fn from_labels(pet_type: Option<&str>, purpose: Option<&str>) -> crate::Result<Self> {
        let mut errors = ValidationErrors::new();

        let pet_type = match pet_type {
            None | Some(ALL_LABEL) => None,
            Some(label) => {
                let parsed = PetType::from_label(label);
                if parsed.is_none() {
                    errors.push(Field::PetType, "Unknown pet type");
                }
                parsed
            }
        };
        let purpose = match purpose {
            None | Some(ALL_LABEL) => None,
            Some(label) => {
                let parsed = Purpose::from_label(label);
                if parsed.is_none() {
                    errors.push(Field::Purpose, "Unknown purpose");
                }
                parsed
            }
        };

        errors.into_result()?;
        Ok(Self { pet_type, purpose })
    }

    pub fn is_empty(&self) -> bool {
        self.pet_type.is_none() && self.purpose.is_none()
    }

    pub fn is_active(&self, category: Category) -> bool {
        match category {
            Category::PetType(t) => self.pet_type == Some(t),
            Category::Purpose(p) => self.purpose == Some(p),
        }
    }

    /// Selection after clicking `category`: an already active value clears
    /// its axis, anything else replaces that axis.  The other axis is kept.
    #[must_use]
    pub fn toggled(self, category: Category) -> Self {
        let mut next = self;
        match category {
            Category::PetType(t) => {
                next.pet_type = if self.pet_type == Some(t) { None } else { Some(t) };
            }
            Category::Purpose(p) => {
                next.purpose = if self.purpose == Some(p) { None } else { Some(p) };
            }
        }
        next
    }

    pub fn matches(&self, listing: &PetListing) -> bool {
        self.pet_type.is_none_or(|t| listing.pet_type == t)
            && self.purpose.is_none_or(|p| listing.purpose == p)
    }

    /// Active categories, pet type first.
    pub fn active_categories(&self) -> Vec<Category> {
        self.pet_type
            .map(Category::PetType)
            .into_iter()
            .chain(self.purpose.map(Category::Purpose))
            .collect()
    }
}

/// Holder of the active selection.  Replacing it is the only mutation.
#[derive(Debug, Default, Clone)]
pub struct FilterState {
    active: FilterSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> FilterSelection {
        self.active
    }

    /// Replace the selection wholesale.  Returns `true` if it changed.
    pub fn set(&mut self, selection: FilterSelection) -> bool {
        let changed = self.active != selection;
        self.active = selection;
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.set(FilterSelection::NONE)
    }
}
