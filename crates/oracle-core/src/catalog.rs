use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A card that can be offered in a draw. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item identifier.
    pub id: ItemId,
    /// Card title.
    pub name: String,
    /// Reference to the card artwork.
    pub image_ref: String,
    /// The reading shown when the card is revealed.
    pub message: String,
    /// The suggested ritual that accompanies the reading.
    pub ritual: String,
    /// When the item was seeded.
    pub created_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Create a catalog item with a fresh ID.
    pub fn new(
        name: impl Into<String>,
        image_ref: impl Into<String>,
        message: impl Into<String>,
        ritual: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            image_ref: image_ref.into(),
            message: message.into(),
            ritual: ritual.into(),
            created_at,
        }
    }
}

const FLAME_IMAGE: &str =
    "https://images.pexels.com/photos/1103970/pexels-photo-1103970.jpeg?auto=compress&cs=tinysrgb&w=400";
const ROSE_IMAGE: &str =
    "https://images.pexels.com/photos/1386604/pexels-photo-1386604.jpeg?auto=compress&cs=tinysrgb&w=400";

/// (name, image, message, ritual) for the stock deck.
const SAMPLE_CARDS: &[(&str, &str, &str, &str)] = &[
    (
        "The Flame of True Love",
        FLAME_IMAGE,
        "True love is blossoming in your life. Open your heart to the blessings \
         the universe is preparing for you.",
        "Light a red candle and meditate for ten minutes, picturing your heart \
         radiating golden light.",
    ),
    (
        "Healing the Wounded Heart",
        ROSE_IMAGE,
        "It is time to heal the wounds of the past. Forgiveness is the key that \
         sets you free for a new cycle.",
        "Bathe with white rose petals and coarse salt, and picture every hurt \
         being washed away.",
    ),
    (
        "The Awakening of Passion",
        ROSE_IMAGE,
        "An intense passion is awakening. Allow yourself to feel deeply and live \
         each moment fully.",
        "Write your wishes on red paper, burn it under the full moon, and scatter \
         the ashes to the wind.",
    ),
    (
        "Harmony in Relationships",
        ROSE_IMAGE,
        "Your relationships are entering a phase of harmony and understanding. \
         Honest dialogue is your strongest tool.",
        "Brew chamomile tea and sip it slowly while sending gratitude to the \
         people who matter to you.",
    ),
    (
        "Self-Love and Worth",
        ROSE_IMAGE,
        "Before loving another fully you must love yourself completely. \
         Recognize your own worth.",
        "Look in the mirror for five minutes and name ten of your qualities \
         aloud, for seven days in a row.",
    ),
    (
        "Renewing the Heart's Vows",
        ROSE_IMAGE,
        "It is time to renew your commitments, to yourself or to your partner. \
         Mature love is a daily choice.",
        "Write a love letter, read it aloud under the stars, and keep it \
         somewhere special.",
    ),
];

/// The stock deck used to seed an empty catalog.
///
/// Each call mints fresh item IDs.
pub fn sample_catalog(now: DateTime<Utc>) -> Vec<CatalogItem> {
    SAMPLE_CARDS
        .iter()
        .map(|(name, image, message, ritual)| {
            CatalogItem::new(*name, *image, *message, *ritual, now)
        })
        .collect()
}
