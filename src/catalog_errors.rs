//! # Catalog Error Types Module
//!
//! This module defines the error types returned when loading a recipe catalog.
//! Ranking itself never fails; only getting the data into memory can.

/// Custom error types for catalog loading
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read
    Io(std::io::Error),
    /// The catalog data is not valid JSON of the expected shape
    Parse(serde_json::Error),
    /// A recipe declares no ingredients, so its match percentage is undefined
    EmptyIngredients(String),
    /// The catalog contains no recipes at all
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "Catalog read error: {err}"),
            CatalogError::Parse(err) => write!(f, "Catalog parse error: {err}"),
            CatalogError::EmptyIngredients(name) => {
                write!(f, "Recipe has no ingredients: {name}")
            }
            CatalogError::Empty => write!(f, "Catalog contains no recipes"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = CatalogError::EmptyIngredients("Mystery Stew".to_string());
        assert_eq!(format!("{}", err), "Recipe has no ingredients: Mystery Stew");

        assert_eq!(format!("{}", CatalogError::Empty), "Catalog contains no recipes");
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
