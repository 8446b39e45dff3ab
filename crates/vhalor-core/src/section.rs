use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the top-level, full-viewport regions of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    Video,
    Product,
    About,
    Contact,
}

impl SectionId {
    /// Page order of the standard layout
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::Video,
        SectionId::Product,
        SectionId::About,
        SectionId::Contact,
    ];

    /// Anchor name, as used by navbar links (`#hero`, `#product`, ...)
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Video => "video",
            SectionId::Product => "product",
            SectionId::About => "about",
            SectionId::Contact => "contact",
        }
    }

    /// Human-readable label shown in the navbar and status bar
    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::Video => "Video",
            SectionId::Product => "Features",
            SectionId::About => "About",
            SectionId::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let anchor = s.trim().trim_start_matches('#').to_lowercase();
        SectionId::ALL
            .into_iter()
            .find(|id| id.anchor() == anchor)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// Ordered, immutable sequence of sections fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    order: Arc<[SectionId]>,
}

impl Default for Sections {
    fn default() -> Self {
        Self::standard()
    }
}

impl Sections {
    /// Build a custom ordering. Rejects empty lists and duplicates.
    pub fn new(order: Vec<SectionId>) -> Result<Self> {
        if order.is_empty() {
            return Err(Error::Config("at least one section is required".to_string()));
        }
        for (i, id) in order.iter().enumerate() {
            if order[..i].contains(id) {
                return Err(Error::Config(format!("duplicate section '{}'", id)));
            }
        }
        Ok(Self { order: order.into() })
    }

    /// hero, video, product, about, contact
    pub fn standard() -> Self {
        Self {
            order: Arc::from(SectionId::ALL.as_slice()),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.order.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<SectionId> {
        self.order.get(index).copied()
    }

    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.order.iter().copied()
    }
}
