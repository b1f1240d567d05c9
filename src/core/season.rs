use crate::domain::model::Season;
use crate::utils::error::{ConvertError, Result};
use regex::Regex;
use std::sync::LazyLock;

static SEASON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(20\d{2})\s*[_/\-]\s*(20\d{2})").expect("season pattern is valid")
});

/// Finds the season in a workbook file stem.
///
/// Accepts `2021_2022`, `2021-2022` and `2021/2022`, with optional spaces
/// around the separator. The first match wins; the years are taken as-is.
pub fn extract_season(stem: &str) -> Result<Season> {
    let caps = SEASON_PATTERN
        .captures(stem)
        .ok_or_else(|| ConvertError::SeasonNotFound {
            file: stem.to_string(),
        })?;

    let (first, second) = (&caps[1], &caps[2]);
    Ok(Season {
        label: format!("{}/{}", first, second),
        key: format!("{}_{}", first, second),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_dash_and_slash_separators() {
        for stem in ["2021_2022", "2021-2022", "2021/2022", "2021 - 2022"] {
            let season = extract_season(stem).unwrap();
            assert_eq!(season.label, "2021/2022");
            assert_eq!(season.key, "2021_2022");
        }
    }

    #[test]
    fn test_season_embedded_in_longer_name() {
        let season = extract_season("Statistiche_Fantacalcio_Stagione_2019_2020_FCM").unwrap();
        assert_eq!(season.key, "2019_2020");
    }

    #[test]
    fn test_first_match_wins() {
        let season = extract_season("2018_2019 vs 2020_2021").unwrap();
        assert_eq!(season.key, "2018_2019");
    }

    #[test]
    fn test_missing_season_is_an_error() {
        let err = extract_season("statistiche").unwrap_err();
        assert!(matches!(err, ConvertError::SeasonNotFound { .. }));

        // Years outside 20xx do not match
        assert!(extract_season("1999_2000").is_err());
    }
}
