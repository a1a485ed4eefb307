//! Display colors for item grades and ark-passive categories.

use serde::Serialize;

/// Fallback for any label not in the tables.
pub const DEFAULT_COLOR: &str = "#9CA3AF";
const DEFAULT_TINT: &str = "rgba(156, 163, 175, 0.15)";

/// Item grades, lowest to highest.
pub const KNOWN_GRADES: [&str; 8] = ["일반", "고급", "희귀", "영웅", "전설", "유물", "고대", "에스더"];

#[must_use]
pub fn grade_color(grade: &str) -> &'static str {
    match grade.trim() {
        "일반" => "#FFFFFF",
        "고급" => "#8DF901",
        "희귀" => "#00B0FA",
        "영웅" => "#CE43FC",
        "전설" => "#F99200",
        "유물" => "#FA5D00",
        "고대" => "#E3C7A1",
        "에스더" => "#3CF2E6",
        _ => DEFAULT_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColors {
    pub main: &'static str,
    pub background_tint: &'static str,
}

/// Colors for the three ark-passive trees (진화 / 깨달음 / 도약).
#[must_use]
pub fn ark_passive_colors(category: &str) -> CategoryColors {
    match category.trim() {
        "진화" => CategoryColors {
            main: "#F1D594",
            background_tint: "rgba(241, 213, 148, 0.15)",
        },
        "깨달음" => CategoryColors {
            main: "#83E9FF",
            background_tint: "rgba(131, 233, 255, 0.15)",
        },
        "도약" => CategoryColors {
            main: "#C2EA55",
            background_tint: "rgba(194, 234, 85, 0.15)",
        },
        _ => CategoryColors {
            main: DEFAULT_COLOR,
            background_tint: DEFAULT_TINT,
        },
    }
}
