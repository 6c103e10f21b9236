//! Data contract: canonical field names, alias resolution and gender
//! normalization
//!
//! The alias tables are pure data, checked once at the ingestion
//! boundary. Unrecognized columns and gender values pass through
//! untouched; downstream one-hot encoding treats an unknown gender as
//! "no category matched" instead of failing, so a malformed cell never
//! aborts a batch.

use crate::table::Table;

/// Canonical age column (months).
pub const AGE_COLUMN: &str = "Umur (bulan)";

/// Canonical gender column.
pub const GENDER_COLUMN: &str = "Jenis Kelamin";

/// Canonical height column (centimeters).
pub const HEIGHT_COLUMN: &str = "Tinggi Badan (cm)";

/// The three fields every prediction input must resolve.
pub const REQUIRED_COLUMNS: [&str; 3] = [AGE_COLUMN, GENDER_COLUMN, HEIGHT_COLUMN];

/// Canonical male gender value.
pub const GENDER_MALE: &str = "laki-laki";

/// Canonical female gender value.
pub const GENDER_FEMALE: &str = "perempuan";

/// Accepted header spellings, compared lowercase and trimmed.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("umur", AGE_COLUMN),
    ("umur (bulan)", AGE_COLUMN),
    ("umur_bulan", AGE_COLUMN),
    ("age_months", AGE_COLUMN),
    ("age (months)", AGE_COLUMN),
    ("jenis kelamin", GENDER_COLUMN),
    ("gender", GENDER_COLUMN),
    ("sex", GENDER_COLUMN),
    ("tinggi badan (cm)", HEIGHT_COLUMN),
    ("tinggi badan", HEIGHT_COLUMN),
    ("tinggi", HEIGHT_COLUMN),
    ("height_cm", HEIGHT_COLUMN),
    ("height (cm)", HEIGHT_COLUMN),
];

const MALE_TOKENS: &[&str] = &["laki-laki", "laki laki", "male", "m", "l"];
const FEMALE_TOKENS: &[&str] = &["perempuan", "female", "f", "p"];

/// Resolve one header cell to its canonical column name, if recognized.
pub fn canonical_column(header: &str) -> Option<&'static str> {
    let needle = header.trim().to_lowercase();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == needle)
        .map(|(_, canonical)| *canonical)
}

/// Return a copy of the table with recognized alias headers renamed to
/// their canonical spelling. Column order and unrecognized headers are
/// preserved.
pub fn normalize_columns(table: &Table) -> Table {
    let mut normalized = table.clone();
    for index in 0..table.headers().len() {
        if let Some(canonical) = canonical_column(&table.headers()[index]) {
            normalized.rename_header(index, canonical);
        }
    }
    normalized
}

/// Gender after normalization. `Unknown` carries the original input so
/// it can round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Unknown(String),
}

impl Gender {
    /// The value handed to the model: canonical for recognized tokens,
    /// the original string otherwise.
    pub fn as_value(&self) -> &str {
        match self {
            Gender::Male => GENDER_MALE,
            Gender::Female => GENDER_FEMALE,
            Gender::Unknown(original) => original,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Gender::Male => GENDER_MALE.to_string(),
            Gender::Female => GENDER_FEMALE.to_string(),
            Gender::Unknown(original) => original,
        }
    }
}

/// Map common gender spellings onto the two canonical values. Anything
/// else (including empty input) is passed through as `Unknown`.
pub fn normalize_gender(raw: &str) -> Gender {
    let token = raw.trim().to_lowercase();
    if MALE_TOKENS.contains(&token.as_str()) {
        Gender::Male
    } else if FEMALE_TOKENS.contains(&token.as_str()) {
        Gender::Female
    } else {
        Gender::Unknown(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_aliases_normalize() {
        for raw in ["laki-laki", "Laki Laki", "MALE", " m ", "L"] {
            assert_eq!(normalize_gender(raw), Gender::Male, "{raw:?}");
            assert_eq!(normalize_gender(raw).as_value(), GENDER_MALE);
        }
    }

    #[test]
    fn test_female_aliases_normalize() {
        for raw in ["perempuan", "Perempuan", "FEMALE", "f", " P"] {
            assert_eq!(normalize_gender(raw), Gender::Female, "{raw:?}");
            assert_eq!(normalize_gender(raw).as_value(), GENDER_FEMALE);
        }
    }

    #[test]
    fn test_unknown_gender_round_trips() {
        for raw in ["", "  ", "laki2", "unbekannt", "123"] {
            let gender = normalize_gender(raw);
            assert_eq!(gender, Gender::Unknown(raw.to_string()));
            assert_eq!(gender.as_value(), raw);
        }
    }

    #[test]
    fn test_column_aliases_resolve() {
        assert_eq!(canonical_column("Age (Months)"), Some(AGE_COLUMN));
        assert_eq!(canonical_column("  UMUR_BULAN "), Some(AGE_COLUMN));
        assert_eq!(canonical_column("Sex"), Some(GENDER_COLUMN));
        assert_eq!(canonical_column("tinggi"), Some(HEIGHT_COLUMN));
        assert_eq!(canonical_column("HEIGHT_CM"), Some(HEIGHT_COLUMN));
        assert_eq!(canonical_column("weight"), None);
    }

    #[test]
    fn test_normalize_columns_preserves_order_and_extras() {
        let table = Table::new(vec![
            "id".into(),
            "Age (Months)".into(),
            "SEX".into(),
            "notes".into(),
            "tinggi badan".into(),
        ]);
        let normalized = normalize_columns(&table);
        assert_eq!(
            normalized.headers(),
            &["id", AGE_COLUMN, GENDER_COLUMN, "notes", HEIGHT_COLUMN]
        );
    }

    #[test]
    fn test_normalize_columns_leaves_input_untouched() {
        let table = Table::new(vec!["gender".into()]);
        let _ = normalize_columns(&table);
        assert_eq!(table.headers(), &["gender"]);
    }
}
