use serde::{Deserialize, Serialize};

use crate::ir::Sex;

/// Card fill/border/indicator colors for one sex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardColors {
    pub fill: String,
    pub border: String,
    pub indicator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub male: CardColors,
    pub female: CardColors,
    pub unknown: CardColors,
    pub uncertain_fill: String,
    pub uncertain_border: String,
    pub marriage_line: String,
    pub parent_child_line: String,
    pub sibling_line: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            male: CardColors {
                fill: "#EFF6FF".to_string(),
                border: "#BFDBFE".to_string(),
                indicator: "#3B82F6".to_string(),
            },
            female: CardColors {
                fill: "#FDF2F8".to_string(),
                border: "#FBCFE8".to_string(),
                indicator: "#EC4899".to_string(),
            },
            unknown: CardColors {
                fill: "#FFFFFF".to_string(),
                border: "#E5E7EB".to_string(),
                indicator: "#9CA3AF".to_string(),
            },
            uncertain_fill: "#FEFCE8".to_string(),
            uncertain_border: "#FACC15".to_string(),
            marriage_line: "#DC2626".to_string(),
            parent_child_line: "#6B7280".to_string(),
            sibling_line: "#10B981".to_string(),
        }
    }
}

impl Theme {
    pub fn card_colors(&self, sex: Sex) -> &CardColors {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
            Sex::Unknown => &self.unknown,
        }
    }
}
