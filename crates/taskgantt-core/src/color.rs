//! Task colors
//!
//! Colors are chosen in two steps. [`ColorSlots`] numbers every distinct task
//! name in first-seen order; a renderer then resolves the slot through its own
//! [`Palette`], wrapping around when there are more tasks than colors. The
//! same name therefore gets the same color everywhere in one run.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// A 24-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn new(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// CSS form, e.g. `#1F77B4`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Accepts `#RRGGBB` or `RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Self::new)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

/// Ordered, non-empty list of colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette; `None` when `colors` is empty
    pub fn new(colors: Vec<Rgb>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// Parse a list of hex strings
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConfigError> {
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Rgb>, _>>()?;
        Self::new(colors).ok_or(ConfigError::EmptyPalette)
    }

    /// Ten-color categorical palette used for spreadsheet bars
    pub fn category10() -> Self {
        Self::from_values(&[
            0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F,
            0xBCBD22, 0x17BECF,
        ])
    }

    /// Ten-color categorical palette used for the interactive chart
    pub fn vivid() -> Self {
        Self::from_values(&[
            0x636EFA, 0xEF553B, 0x00CC96, 0xAB63FA, 0xFFA15A, 0x19D3F3, 0xFF6692, 0xB6E880,
            0xFF97FF, 0xFECB52,
        ])
    }

    fn from_values(values: &[u32]) -> Self {
        Self {
            colors: values.iter().copied().map(Rgb::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a slot, wrapping around the palette
    pub fn color(&self, slot: usize) -> Rgb {
        self.colors[slot % self.colors.len()]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::category10()
    }
}

/// Palette slot per distinct task name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorSlots {
    slots: HashMap<String, usize>,
    order: Vec<String>,
}

impl ColorSlots {
    /// Number names in first-seen order; repeats keep their first slot
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut slots = Self::default();
        for name in names {
            if !slots.slots.contains_key(name) {
                slots.slots.insert(name.to_string(), slots.order.len());
                slots.order.push(name.to_string());
            }
        }
        slots
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Resolve a task name to a color of `palette`
    pub fn color(&self, name: &str, palette: &Palette) -> Option<Rgb> {
        self.slot(name).map(|slot| palette.color(slot))
    }

    /// Names in slot order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Names in alphabetical order, as shown in legends
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.order.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
