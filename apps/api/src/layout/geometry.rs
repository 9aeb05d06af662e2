use serde::{Deserialize, Serialize};

use crate::errors::ComposeError;

/// Fixed page geometry, supplied once when the layout engine is constructed.
///
/// All lengths are layout units (millimetres). Defaults reproduce an A4 sheet
/// with 20mm side and top margins and an automatic break 20mm above the
/// bottom edge (10mm margin plus 10mm footer band).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    /// Band above the bottom margin kept free for the page footer.
    pub footer_reservation: f32,
    /// Distance from the bottom edge at which content breaks to a new page.
    /// Overrides `margin_bottom + footer_reservation` when set.
    pub auto_page_break_threshold: Option<f32>,
    pub line_height: f32,
    /// Width of the label column shared by every key/value row.
    pub label_column_width: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 20.0,
            margin_top: 20.0,
            margin_right: 20.0,
            margin_bottom: 10.0,
            footer_reservation: 10.0,
            auto_page_break_threshold: None,
            line_height: 6.0,
            label_column_width: 60.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn top_of_content(&self) -> f32 {
        self.margin_top
    }

    /// Lowest y a unit may reach before a page break is required.
    pub fn content_floor(&self) -> f32 {
        let reserved = self
            .auto_page_break_threshold
            .unwrap_or(self.margin_bottom + self.footer_reservation);
        self.page_height - reserved
    }

    /// Height available to units on a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.content_floor() - self.top_of_content()
    }

    /// Baseline row of the footer: the middle of the footer band.
    pub fn footer_y(&self) -> f32 {
        self.page_height - self.margin_bottom - self.footer_reservation / 2.0
    }

    pub fn value_column_width(&self) -> f32 {
        self.content_width() - self.label_column_width
    }

    pub fn signature_column_width(&self) -> f32 {
        self.content_width() / 2.0
    }

    /// Rejects geometry that leaves no room for content.
    pub fn validate(&self) -> Result<(), ComposeError> {
        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin_left", self.margin_left),
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("footer_reservation", self.footer_reservation),
            ("line_height", self.line_height),
            ("label_column_width", self.label_column_width),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ComposeError::InvalidGeometry(format!(
                    "{name} must be a finite, non-negative length (got {value})"
                )));
            }
        }
        if let Some(threshold) = self.auto_page_break_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ComposeError::InvalidGeometry(format!(
                    "auto_page_break_threshold must be non-negative (got {threshold})"
                )));
            }
        }
        if self.line_height <= 0.0 {
            return Err(ComposeError::InvalidGeometry(
                "line_height must be positive".to_string(),
            ));
        }
        if self.value_column_width() <= 0.0 {
            return Err(ComposeError::InvalidGeometry(format!(
                "label column ({}) leaves no room in a content width of {}",
                self.label_column_width,
                self.content_width()
            )));
        }
        if self.usable_height() < self.line_height {
            return Err(ComposeError::InvalidGeometry(format!(
                "content area ({}) is shorter than one line",
                self.usable_height()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_matches_a4_template() {
        let g = PageGeometry::default();
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.content_floor(), 277.0);
        assert_eq!(g.usable_height(), 257.0);
        assert_eq!(g.value_column_width(), 110.0);
        assert_eq!(g.signature_column_width(), 85.0);
        assert_eq!(g.footer_y(), 282.0);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_threshold_overrides_bottom_reservation() {
        let g = PageGeometry {
            auto_page_break_threshold: Some(30.0),
            ..PageGeometry::default()
        };
        assert_eq!(g.content_floor(), 267.0);
    }

    #[test]
    fn test_validate_rejects_wide_label_column() {
        let g = PageGeometry {
            label_column_width: 200.0,
            ..PageGeometry::default()
        };
        assert!(matches!(g.validate(), Err(ComposeError::InvalidGeometry(_))));
    }

    #[test]
    fn test_validate_rejects_collapsed_content_area() {
        let g = PageGeometry {
            page_height: 40.0,
            ..PageGeometry::default()
        };
        assert!(matches!(g.validate(), Err(ComposeError::InvalidGeometry(_))));
    }

    #[test]
    fn test_validate_rejects_zero_line_height() {
        let g = PageGeometry {
            line_height: 0.0,
            ..PageGeometry::default()
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_geometry_deserializes_partial_json() {
        let g: PageGeometry = serde_json::from_str(r#"{"page_height": 600}"#).unwrap();
        assert_eq!(g.page_height, 600.0);
        assert_eq!(g.margin_left, 20.0);
    }
}
