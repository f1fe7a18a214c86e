use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use sprite_collector::assets::*;
use sprite_collector::error::AssetError;

fn write_all(dir: &Path) {
    fs::write(dir.join("player.txt"), " o \n/|\\\n").unwrap();
    fs::write(dir.join("collectible.txt"), "*").unwrap();
    fs::write(dir.join("background.txt"), ". .\n . \n").unwrap();
}

#[test]
fn parse_pads_ragged_rows_and_drops_trailing_blank_lines() {
    let sprite = Sprite::parse(AssetId::Player, Path::new("p.txt"), "ab\r\nabcd\n\n   \n").unwrap();
    assert_eq!(sprite.width(), 4);
    assert_eq!(sprite.height(), 2);
    assert_eq!(sprite.get(1, 0), Some('b'));
    assert_eq!(sprite.get(3, 0), Some(' '));
    assert_eq!(sprite.get(4, 0), None);
    assert_eq!(sprite.get(0, 2), None);
}

#[test]
fn parse_rejects_empty_art() {
    let err = Sprite::parse(AssetId::Collectible, Path::new("c.txt"), "  \n\n").unwrap_err();
    assert!(matches!(
        err,
        AssetError::Empty {
            asset: AssetId::Collectible,
            ..
        }
    ));
}

#[test]
fn mirrored_lookup_reverses_columns_and_swaps_glyphs() {
    let sprite = Sprite::parse(AssetId::Player, Path::new("p.txt"), "(o>").unwrap();
    let mirrored: String = (0..3).filter_map(|x| sprite.get_mirrored(x, 0)).collect();
    assert_eq!(mirrored, "<o)");
    assert_eq!(sprite.get_mirrored(3, 0), None);
}

#[test]
fn load_sprite_reads_named_file() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let sprite = load_sprite(dir.path(), AssetId::Player).unwrap();
    assert_eq!((sprite.width(), sprite.height()), (3, 2));
}

#[test]
fn loader_waits_for_all_three_assets() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let assets = AssetLoader::spawn(dir.path()).wait().unwrap();
    assert_eq!(assets.collectible.get(0, 0), Some('*'));
    assert_eq!(assets.background.height(), 2);
    assert_eq!(assets.player.get(1, 1), Some('|'));
}

#[test]
fn loader_polls_until_ready() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let mut loader = AssetLoader::spawn(dir.path());
    assert_eq!(loader.pending().len(), 3);

    let mut ready = None;
    for _ in 0..500 {
        match loader.poll() {
            LoadStatus::Pending { remaining } => {
                assert!(remaining > 0 && remaining <= 3);
                thread::sleep(Duration::from_millis(5));
            }
            LoadStatus::Ready(assets) => {
                ready = Some(assets);
                break;
            }
            LoadStatus::Failed(err) => panic!("unexpected failure: {err}"),
        }
    }
    assert!(ready.is_some(), "assets never became ready");
    assert!(loader.pending().is_empty());
}

#[test]
fn missing_asset_fails_the_gate() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::remove_file(dir.path().join("background.txt")).unwrap();

    let err = AssetLoader::spawn(dir.path()).wait().unwrap_err();
    match err {
        AssetError::Io { asset, path, .. } => {
            assert_eq!(asset, AssetId::Background);
            assert!(path.ends_with("background.txt"));
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn missing_asset_fails_poll_instead_of_stalling() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("player.txt"), "@").unwrap();

    let mut loader = AssetLoader::spawn(dir.path());
    let mut failed = false;
    for _ in 0..500 {
        match loader.poll() {
            LoadStatus::Pending { .. } => thread::sleep(Duration::from_millis(5)),
            LoadStatus::Ready(_) => panic!("cannot be ready with missing files"),
            LoadStatus::Failed(err) => {
                assert!(err.to_string().contains("failed to load"));
                failed = true;
                break;
            }
        }
    }
    assert!(failed);
}

#[test]
fn file_names_are_fixed() {
    let names: Vec<&str> = AssetId::ALL.iter().map(|a| a.file_name()).collect();
    assert_eq!(names, ["player.txt", "collectible.txt", "background.txt"]);
}

#[test]
fn shipped_assets_load() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    assert!(AssetLoader::spawn(&dir).wait().is_ok());
}
