//! End-to-end intent flow against an on-disk catalog and options file

use painting_gallery::config::Config;
use painting_gallery::state::library::Library;
use painting_gallery::state::options::{Category, OptionStore};
use painting_gallery::{AddPainting, Status, Synchronizer};
use tempfile::{tempdir, TempDir};

fn open(dir: &TempDir) -> Synchronizer {
    let config = Config::in_dir(dir.path());
    let library = Library::open(&config.db_path).expect("open catalog");
    let options = OptionStore::load(&config.options_path);
    Synchronizer::new(library, options)
}

fn form(title: &str) -> AddPainting {
    AddPainting {
        title: title.to_string(),
        artist: "Иван Шишкин".to_string(),
        year: "1889".to_string(),
        image_url: format!("http://img/{title}.png"),
        materials: vec!["холст".to_string()],
        new_material: "масло".to_string(),
        new_genre: "пейзаж".to_string(),
        location: "Государственная Третьяковская галерея, Москва".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_state_survives_restart() {
    let dir = tempdir().unwrap();

    {
        let mut sync = open(&dir);
        let outcome = sync.add_painting(&form("Утро в сосновом лесу"));
        assert!(outcome.status.is_success(), "{:?}", outcome.status);
    }

    let sync = open(&dir);
    let listed = sync.list().paintings;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].details.materials, "холст, масло");
    assert_eq!(sync.options().values(Category::Genre), ["пейзаж"]);
    assert_eq!(sync.options().values(Category::Material), ["холст", "масло"]);

    let detail = sync.painting_detail(listed[0].id).detail.unwrap();
    assert!(detail.coordinates.is_some());
}

#[test]
fn test_export_import_roundtrip() {
    let dir = tempdir().unwrap();
    let mut sync = open(&dir);
    sync.add_painting(&form("Рожь"));
    sync.add_painting(&AddPainting {
        description: "Сосны, \"туман\"\nи утро".to_string(),
        ..form("Утро")
    });

    let table = sync.list().paintings;
    let export = sync.export_csv(&table);
    assert!(export.status.is_success());
    let csv = export.csv;

    // Import into a fresh catalog and export again
    let other_dir = tempdir().unwrap();
    let mut other = open(&other_dir);
    let outcome = other.import_csv(&csv);
    assert_eq!(outcome.status, Status::Success("File uploaded successfully.".to_string()));
    assert_eq!(outcome.paintings, table);

    let again = other.export_csv(&outcome.paintings);
    assert_eq!(again.csv, csv);
}

#[test]
fn test_save_edits_removes_deleted_rows() {
    let dir = tempdir().unwrap();
    let mut sync = open(&dir);
    for title in ["a", "b", "c"] {
        sync.add_painting(&form(title));
    }

    let mut table = sync.list().paintings;
    let removed = table.remove(2);
    table[0].details.year = "1890".to_string();
    let kept: Vec<i64> = table.iter().map(|p| p.id).collect();

    let outcome = sync.save_edits(table);

    let ids: Vec<i64> = outcome.paintings.iter().map(|p| p.id).collect();
    assert_eq!(ids, kept);
    assert_eq!(outcome.paintings[0].details.year, "1890");
    assert!(sync.painting_detail(removed.id).detail.is_none());
}

#[test]
fn test_rejected_add_still_grows_options() {
    let dir = tempdir().unwrap();
    let mut sync = open(&dir);

    let outcome = sync.add_painting(&AddPainting {
        title: String::new(),
        new_movement: "передвижники".to_string(),
        ..form("x")
    });

    assert!(matches!(outcome.status, Status::Rejected(_)));
    assert!(outcome.paintings.is_empty());

    let reopened = OptionStore::load(&Config::in_dir(dir.path()).options_path);
    assert!(reopened.contains(Category::Movement, "передвижники"));
}

#[test]
fn test_dropped_table_fails_every_intent_without_panicking() {
    let dir = tempdir().unwrap();
    let mut sync = open(&dir);
    sync.add_painting(&form("Рожь"));

    let db_path = Config::in_dir(dir.path()).db_path;
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute("DROP TABLE paintings", [])
        .unwrap();

    assert!(matches!(sync.list().status, Status::Failed(_)));
    assert!(matches!(sync.gallery().status, Status::Failed(_)));
    assert!(matches!(sync.painting_detail(1).status, Status::Failed(_)));
    assert!(matches!(sync.add_painting(&form("Утро")).status, Status::Failed(_)));
}
