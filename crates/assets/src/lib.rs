//! Item catalog: the immutable table of collectible item types.
//!
//! Items are referenced by [`ItemId`], an index into the catalog. The catalog
//! is either the built-in table or loaded from a JSON file, and is validated
//! on construction so selection never sees a negative or non-finite weight.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Index of an item type inside its [`ItemCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u16);

/// What using an item does to the observer or the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Energy,
    Light,
    Health,
    Lore,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub name: String,
    pub effect: EffectKind,
    /// Amount restored for energy/health items; unused for light and lore.
    pub magnitude: f32,
    /// Relative spawn weight. Weights need not sum to one.
    pub rarity: f32,
    /// Display tint as 0xRRGGBB.
    #[serde(default = "default_color")]
    pub color: u32,
}

fn default_color() -> u32 {
    0xcccccc
}

/// Errors from catalog construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Validated, immutable list of item types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ItemType>", into = "Vec<ItemType>")]
pub struct ItemCatalog {
    items: Vec<ItemType>,
}

impl ItemCatalog {
    /// Build a catalog, rejecting duplicate names and bad weights.
    pub fn new(items: Vec<ItemType>) -> Result<Self, CatalogError> {
        if items.len() > u16::MAX as usize {
            return Err(CatalogError::Invalid(format!(
                "{} item types exceeds the catalog limit",
                items.len()
            )));
        }
        for (i, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(CatalogError::Invalid(format!("item {i} has an empty name")));
            }
            if !item.rarity.is_finite() || item.rarity < 0.0 {
                return Err(CatalogError::Invalid(format!(
                    "item '{}' has rarity {}",
                    item.name, item.rarity
                )));
            }
            if !item.magnitude.is_finite() {
                return Err(CatalogError::Invalid(format!(
                    "item '{}' has a non-finite magnitude",
                    item.name
                )));
            }
            if items[..i].iter().any(|other| other.name == item.name) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate item name '{}'",
                    item.name
                )));
            }
        }
        Ok(Self { items })
    }

    /// The default four-item table. Weights are deliberately tiny; only their
    /// ratios matter for selection.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                ItemType {
                    name: "Energy Drink".into(),
                    effect: EffectKind::Energy,
                    magnitude: 25.0,
                    rarity: 0.02,
                    color: 0x00ff00,
                },
                ItemType {
                    name: "Flashlight Battery".into(),
                    effect: EffectKind::Light,
                    magnitude: 1.0,
                    rarity: 0.015,
                    color: 0xffff00,
                },
                ItemType {
                    name: "Health Kit".into(),
                    effect: EffectKind::Health,
                    magnitude: 30.0,
                    rarity: 0.01,
                    color: 0xff0000,
                },
                ItemType {
                    name: "Old Photo".into(),
                    effect: EffectKind::Lore,
                    magnitude: 1.0,
                    rarity: 0.005,
                    color: 0xffa500,
                },
            ],
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let items: Vec<ItemType> = serde_json::from_str(data)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON array of item types.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&data)?;
        tracing::info!(
            path = %path.as_ref().display(),
            items = catalog.len(),
            "loaded item catalog"
        );
        Ok(catalog)
    }

    /// Save the catalog as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &self.items)?;
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemType> {
        self.items.get(id.0 as usize)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.name == name)
            .map(|i| ItemId(i as u16))
    }

    /// Display name of `id`, or a placeholder for ids from another catalog.
    pub fn name_of(&self, id: ItemId) -> &str {
        self.get(id).map(|item| item.name.as_str()).unwrap_or("<unknown>")
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemType)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u16), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f32 {
        self.items.iter().map(|item| item.rarity).sum()
    }

    /// Draw one item type with probability proportional to its rarity weight.
    ///
    /// Returns `None` when the catalog is empty or every weight is zero.
    pub fn pick_weighted<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ItemId> {
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        let roll = rng.random::<f32>() * total;
        let mut cumulative = 0.0;
        let mut last_weighted = None;
        for (id, item) in self.iter() {
            if item.rarity <= 0.0 {
                continue;
            }
            cumulative += item.rarity;
            last_weighted = Some(id);
            if roll < cumulative {
                return Some(id);
            }
        }
        // Float accumulation can leave `roll` a hair above the final sum.
        last_weighted
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<ItemType>> for ItemCatalog {
    type Error = CatalogError;

    fn try_from(items: Vec<ItemType>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<ItemCatalog> for Vec<ItemType> {
    fn from(catalog: ItemCatalog) -> Self {
        catalog.items
    }
}

pub fn crate_info() -> &'static str {
    "liminal-assets v0.1.0"
}
