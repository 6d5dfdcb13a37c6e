//! Scanner behavior over synthetic enumerations


use proptest::prelude::*;
use shoebox_core::types::{LABEL_ORIGINAL, LABEL_ORIGINAL_JPEG, LABEL_ORIGINAL_RAW};
use shoebox_core::{DecoderRegistry, FileImportInfo};
use shoebox_importer::decoders::{is_image_file, is_jpeg_file, is_raw_file};
use shoebox_importer::scanner::{FileEnumerator, SourceScanner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Yields a fixed list of paths, ignoring root and recursion
struct ListEnumerator(Vec<PathBuf>);

impl FileEnumerator for ListEnumerator {
    fn enumerate<'a>(
        &'a self,
        _root: &Path,
        _recurse: bool,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        Box::new(self.0.iter().cloned())
    }
}

/// Extension-only registry that never touches the disk
struct NameRegistry;

impl DecoderRegistry for NameRegistry {
    fn has_loader(&self, path: &Path) -> bool {
        is_image_file(path)
    }

    fn is_raw(&self, path: &Path) -> bool {
        is_raw_file(path)
    }

    fn is_jpeg_raw_pair(&self, a: &Path, b: &Path) -> bool {
        a.with_extension("") == b.with_extension("")
            && ((is_raw_file(a) && is_jpeg_file(b)) || (is_jpeg_file(a) && is_raw_file(b)))
    }
}

fn scan(files: &[&str], merge: bool) -> Vec<FileImportInfo> {
    test_helpers::init_logging();
    let paths = files.iter().map(|f| PathBuf::from("/card").join(f)).collect();
    let scanner = SourceScanner::new("/card", Arc::new(NameRegistry))
        .with_enumerator(Arc::new(ListEnumerator(paths)));
    scanner.scan_photos(true, merge).collect()
}

fn originals(units: &[FileImportInfo]) -> Vec<PathBuf> {
    units.iter().map(|u| u.default_path().to_path_buf()).collect()
}

#[test]
fn test_jpeg_before_raw_still_makes_raw_the_original() {
    let units = scan(&["IMG_1.jpg", "IMG_1.nef"], true);

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].original().label, LABEL_ORIGINAL_RAW);
    assert_eq!(units[0].default_path(), Path::new("/card/IMG_1.nef"));
    assert_eq!(units[0].versions()[0].path, PathBuf::from("/card/IMG_1.jpg"));
    assert_eq!(units[0].versions()[0].label, LABEL_ORIGINAL_JPEG);
}

#[test]
fn test_pairing_only_looks_at_neighbors() {
    let units = scan(&["IMG_1.nef", "IMG_2.jpg", "IMG_1.jpg"], true);

    assert_eq!(
        originals(&units),
        vec![
            PathBuf::from("/card/IMG_1.nef"),
            PathBuf::from("/card/IMG_2.jpg"),
            PathBuf::from("/card/IMG_1.jpg"),
        ]
    );
    assert!(units.iter().all(|u| u.versions().is_empty()));
}

#[test]
fn test_unloadable_files_do_not_break_pairs() {
    let units = scan(&["IMG_1.nef", "IMG_1.thm", "notes.txt", "IMG_1.jpg"], true);

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].versions().len(), 1);
}

#[test]
fn test_pair_consumes_both_files() {
    let units = scan(&["a.nef", "a.jpg", "a.jpg", "b.png"], true);

    assert_eq!(
        originals(&units),
        vec![
            PathBuf::from("/card/a.nef"),
            PathBuf::from("/card/a.jpg"),
            PathBuf::from("/card/b.png"),
        ]
    );
    assert_eq!(units[1].original().label, LABEL_ORIGINAL);
}

#[test]
fn test_no_merge_keeps_every_file_separate() {
    let units = scan(&["IMG_1.nef", "IMG_1.jpg"], false);

    assert_eq!(units.len(), 2);
    assert!(units.iter().all(|u| u.original().label == LABEL_ORIGINAL));
}

fn file_name() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a", "b", "c"]),
        prop::sample::select(vec!["jpg", "JPG", "nef", "cr2", "png", "txt"]),
    )
        .prop_map(|(stem, ext)| format!("{}.{}", stem, ext))
}

proptest! {
    #[test]
    fn prop_every_loadable_file_lands_in_exactly_one_unit(
        names in prop::collection::vec(file_name(), 0..24),
        merge in any::<bool>(),
    ) {
        let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        let units = scan(&refs, merge);

        let mut expected: Vec<PathBuf> = names
            .iter()
            .map(|n| PathBuf::from("/card").join(n))
            .filter(|p| is_image_file(p))
            .collect();
        let mut emitted: Vec<PathBuf> = units
            .iter()
            .flat_map(|u| u.all_versions().map(|v| v.path.clone()))
            .collect();
        expected.sort();
        emitted.sort();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn prop_merged_units_are_raw_plus_jpeg_siblings(
        names in prop::collection::vec(file_name(), 0..24),
    ) {
        let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();

        for unit in scan(&refs, true) {
            prop_assert!(unit.versions().len() <= 1);
            if let Some(jpeg) = unit.versions().first() {
                prop_assert!(is_raw_file(unit.default_path()));
                prop_assert!(is_jpeg_file(&jpeg.path));
                prop_assert_eq!(unit.default_path().with_extension(""), jpeg.path.with_extension(""));
                prop_assert_eq!(&unit.original().label, LABEL_ORIGINAL_RAW);
            } else {
                prop_assert_eq!(&unit.original().label, LABEL_ORIGINAL);
            }
        }
    }

    #[test]
    fn prop_without_merge_one_unit_per_file(
        names in prop::collection::vec(file_name(), 0..24),
    ) {
        let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        let loadable = names
            .iter()
            .filter(|n| is_image_file(Path::new(n.as_str())))
            .count();

        let units = scan(&refs, false);

        prop_assert_eq!(units.len(), loadable);
        prop_assert!(units.iter().all(|u| u.versions().is_empty()));
    }
}
