// Palette domain model - waiting point to color slot
use std::collections::BTreeMap;

pub const PALETTE_COLORS: [&str; 12] = [
    "lightblue",
    "lightgreen",
    "lightcoral",
    "khaki",
    "plum",
    "orange",
    "mediumaquamarine",
    "lightsteelblue",
    "salmon",
    "gold",
    "lightpink",
    "mediumpurple",
];

pub const PALETTE_SIZE: usize = PALETTE_COLORS.len();

/// Used by renderers for points missing from the palette.
pub const FALLBACK_COLOR: &str = "lightgray";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    slots: BTreeMap<String, usize>,
}

impl Palette {
    pub(crate) fn from_slots(slots: BTreeMap<String, usize>) -> Self {
        Self { slots }
    }

    pub fn slot_of(&self, point_id: &str) -> Option<usize> {
        self.slots.get(point_id).copied()
    }

    pub fn color_of(&self, point_id: &str) -> &'static str {
        self.slot_of(point_id)
            .map(|slot| PALETTE_COLORS[slot % PALETTE_SIZE])
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.slots.iter().map(|(id, slot)| (id.as_str(), *slot))
    }
}
