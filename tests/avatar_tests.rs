// Avatar catalog lookup and sentence planning.

use std::fs;

use tempfile::TempDir;

use signbridge::avatar::AvatarCatalog;
use signbridge::models::{Gender, SignLabel};

fn seed_catalog() -> (TempDir, AvatarCatalog) {
    let dir = TempDir::new().expect("temp dir");
    let female = dir.path().join("female");
    fs::create_dir_all(&female).expect("create female dir");
    for stem in ["a", "b"] {
        fs::write(female.join(format!("{stem}.gif")), b"gif").expect("write asset");
    }
    let catalog = AvatarCatalog::new(dir.path().to_path_buf());
    (dir, catalog)
}

#[test]
fn test_lookup_finds_existing_asset() {
    let (_dir, catalog) = seed_catalog();

    let asset = catalog.lookup(Gender::Female, SignLabel::from_char('A').unwrap());
    let path = asset.expect("a.gif exists");
    assert!(path.ends_with("female/a.gif"));
}

#[test]
fn test_lookup_misses_are_none() {
    let (_dir, catalog) = seed_catalog();

    // No asset for this letter, and no male set at all.
    assert!(catalog
        .lookup(Gender::Female, SignLabel::from_char('Z').unwrap())
        .is_none());
    assert!(catalog
        .lookup(Gender::Male, SignLabel::from_char('A').unwrap())
        .is_none());
}

#[test]
fn test_plan_sentence_filters_and_records_misses() {
    let (_dir, catalog) = seed_catalog();

    let plan = catalog.plan_sentence(Gender::Female, "ab z! 1");

    let letters: Vec<char> = plan.iter().map(|step| step.letter.as_char()).collect();
    assert_eq!(letters, vec!['A', 'B', 'Z']);

    assert!(plan[0].asset.is_some());
    assert!(plan[1].asset.is_some());
    assert!(plan[2].asset.is_none(), "missing asset is kept in the plan");
}

#[test]
fn test_plan_sentence_uppercases_input() {
    let (_dir, catalog) = seed_catalog();

    let lower = catalog.plan_sentence(Gender::Female, "ab");
    let upper = catalog.plan_sentence(Gender::Female, "AB");
    assert_eq!(lower, upper);
}
