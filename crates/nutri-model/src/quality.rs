//! Qualitative nutrition labels derived from the Nutri-Score letter grade.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nutrition quality label.
///
/// Grades `A` through `E` map to the first five variants; anything else
/// (missing, empty, unrecognized) maps to [`NutritionQuality::Inconnu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutritionQuality {
    Excellent,
    Bon,
    Moyen,
    Mediocre,
    Mauvais,
    Inconnu,
}

impl NutritionQuality {
    /// Classify a grade. The grade is trimmed and uppercased first.
    pub fn from_grade(grade: Option<&str>) -> Self {
        let Some(grade) = grade else {
            return Self::Inconnu;
        };
        match grade.trim().to_uppercase().as_str() {
            "A" => Self::Excellent,
            "B" => Self::Bon,
            "C" => Self::Moyen,
            "D" => Self::Mediocre,
            "E" => Self::Mauvais,
            _ => Self::Inconnu,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Bon => "Bon",
            Self::Moyen => "Moyen",
            Self::Mediocre => "Mediocre",
            Self::Mauvais => "Mauvais",
            Self::Inconnu => "Inconnu",
        }
    }
}

impl fmt::Display for NutritionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_map_to_labels() {
        assert_eq!(NutritionQuality::from_grade(Some("a")), NutritionQuality::Excellent);
        assert_eq!(NutritionQuality::from_grade(Some(" B ")), NutritionQuality::Bon);
        assert_eq!(NutritionQuality::from_grade(Some("c")), NutritionQuality::Moyen);
        assert_eq!(NutritionQuality::from_grade(Some("D")), NutritionQuality::Mediocre);
        assert_eq!(NutritionQuality::from_grade(Some("e")), NutritionQuality::Mauvais);
    }

    #[test]
    fn unrecognized_grades_are_unknown() {
        assert_eq!(NutritionQuality::from_grade(None), NutritionQuality::Inconnu);
        assert_eq!(NutritionQuality::from_grade(Some("")), NutritionQuality::Inconnu);
        assert_eq!(NutritionQuality::from_grade(Some("F")), NutritionQuality::Inconnu);
        assert_eq!(
            NutritionQuality::from_grade(Some("not-applicable")),
            NutritionQuality::Inconnu
        );
        assert_eq!(NutritionQuality::Inconnu.to_string(), "Inconnu");
    }
}
