//! Economy catalog loader.

use std::path::Path;

use crate::ContentCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for the economy catalog from RON files.
///
/// Expected shape:
///
/// ```ron
/// (
///     races: [
///         (race: Elves, initial_grants: [
///             (kind: Wood, amount: 100, unit_weight: 1.0),
///         ]),
///     ],
///     buildings: [
///         (building: SimpleBuilding, costs: [(kind: Wood, amount: 50)]),
///     ],
/// )
/// ```
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the full catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ContentCatalog> {
        let content = read_file(path)?;
        let catalog: ContentCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse economy catalog RON: {}", e))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use torus_core::{BuildingKind, RaceKind, ResourceKind};

    fn write_ron(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_catalog_from_ron() {
        let file = write_ron(
            r#"(
                races: [
                    (race: Dwarves, initial_grants: [
                        (kind: Wood, amount: 80, unit_weight: 1.0),
                        (kind: Sword, amount: 3, unit_weight: 7.0),
                    ]),
                ],
                buildings: [
                    (building: DwarfHouse, costs: [(kind: Wood, amount: 80)]),
                ],
            )"#,
        );

        let catalog = CatalogLoader::load(file.path()).unwrap();
        let grants = catalog.initial_grants(RaceKind::Dwarves);
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[1].kind, ResourceKind::Sword);
        assert_eq!(
            catalog.building_cost(BuildingKind::DwarfHouse),
            vec![(ResourceKind::Wood, 80)]
        );
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let file = write_ron("(races: [oops");
        assert!(CatalogLoader::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = CatalogLoader::load(Path::new("/nonexistent/economy.ron")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn builtin_catalog_round_trips_through_ron() {
        let builtin = ContentCatalog::builtin();
        let text = ron::to_string(&builtin).unwrap();
        let file = write_ron(&text);
        assert_eq!(CatalogLoader::load(file.path()).unwrap(), builtin);
    }
}
