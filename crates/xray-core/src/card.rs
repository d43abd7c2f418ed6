//! Ingredient card view model.
//!
//! An ingredient card shows a hero title over its image by default and
//! reveals the "X-Ray" data sheet while it is long-pressed. This module only
//! decides *what* each face contains; drawing and animation belong to the
//! host.

use serde::{Deserialize, Serialize};

/// Hint appended to the card's accessible label.
pub const HOLD_HINT: &str = "Detayları görmek için basılı tutun.";

pub const LABEL_ORIGIN: &str = "KÖKENİ";
pub const LABEL_ACTIVE_COMPOUND: &str = "AKTİF BİLEŞEN";
pub const LABEL_LAB_RESULT: &str = "LABORATUVAR SONUCU";

/// One ingredient record, passed through to the presentation untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub image: String,
    pub name: String,
    pub hero_title: String,
    pub subtitle: String,
    pub origin: String,
    pub active_compound: String,
    pub lab_result: String,
}

/// A labelled value on the revealed face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub label: String,
    pub value: String,
    /// Rendered as a verification badge instead of plain text.
    #[serde(default)]
    pub badge: bool,
}

/// What the card shows for a given `pressed` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "face", rename_all = "camelCase")]
pub enum CardFace {
    /// Resting state: hero copy plus the pulsing fingerprint hint.
    #[serde(rename_all = "camelCase")]
    Default {
        hero_title: String,
        subtitle: String,
        show_hint: bool,
    },
    /// Long-press state: the X-Ray overlay.
    #[serde(rename_all = "camelCase")]
    Revealed {
        name: String,
        data_points: Vec<DataPoint>,
    },
}

impl CardFace {
    pub fn is_revealed(&self) -> bool {
        matches!(self, CardFace::Revealed { .. })
    }
}

impl Ingredient {
    /// Parse a single ingredient record from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid ingredient: {e}"))
    }

    /// Accessible label for the card element.
    pub fn aria_label(&self) -> String {
        format!("{} - {}. {HOLD_HINT}", self.hero_title, self.subtitle)
    }

    /// Data sheet shown on the revealed face, in display order.
    pub fn data_points(&self) -> Vec<DataPoint> {
        vec![
            DataPoint {
                label: LABEL_ORIGIN.to_string(),
                value: self.origin.clone(),
                badge: false,
            },
            DataPoint {
                label: LABEL_ACTIVE_COMPOUND.to_string(),
                value: self.active_compound.clone(),
                badge: false,
            },
            DataPoint {
                label: LABEL_LAB_RESULT.to_string(),
                value: self.lab_result.clone(),
                badge: true,
            },
        ]
    }

    pub fn face(&self, pressed: bool) -> CardFace {
        if pressed {
            CardFace::Revealed {
                name: self.name.clone(),
                data_points: self.data_points(),
            }
        } else {
            CardFace::Default {
                hero_title: self.hero_title.clone(),
                subtitle: self.subtitle.clone(),
                show_hint: true,
            }
        }
    }
}

/// An ingredient paired with its recognizer's `pressed` output.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientCard {
    pub ingredient: Ingredient,
    pub aria_pressed: bool,
}

impl IngredientCard {
    pub fn new(ingredient: Ingredient) -> Self {
        Self {
            ingredient,
            aria_pressed: false,
        }
    }

    /// Mirror the recognizer's `pressed` value. Returns true if it changed.
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        let changed = self.aria_pressed != pressed;
        self.aria_pressed = pressed;
        changed
    }

    pub fn face(&self) -> CardFace {
        self.ingredient.face(self.aria_pressed)
    }

    pub fn aria_label(&self) -> String {
        self.ingredient.aria_label()
    }
}
