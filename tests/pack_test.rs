mod common;

use agent_chorus::events::Category;
use agent_chorus::pack::{self, PackLookup, PackResolver, RawManifest, Schema};
use std::fs;

#[test]
fn current_schema_pack_resolves() {
    let (_dir, paths) = common::temp_home();
    common::write_current_pack(
        &paths.packs_dir,
        "peon",
        &[("task.complete", &["sounds/done.wav", "sounds/finished.wav"])],
    );

    let mut resolver = PackResolver::new(&paths.packs_dir);
    let PackLookup::Found(pack) = resolver.resolve("peon") else {
        panic!("pack should resolve");
    };
    assert_eq!(pack.schema, Schema::Current);
    assert_eq!(pack.manifest.sounds(Category::TaskComplete).len(), 2);
    assert_eq!(
        pack.manifest.sounds(Category::TaskComplete)[0].transcript_line.as_deref(),
        Some("line for sounds/done.wav")
    );
}

#[test]
fn missing_pack_is_not_found() {
    let (_dir, paths) = common::temp_home();
    let mut resolver = PackResolver::new(&paths.packs_dir);
    assert!(matches!(resolver.resolve("ghost"), PackLookup::NotFound));

    fs::create_dir_all(paths.packs_dir.join("empty")).unwrap();
    assert!(matches!(resolver.resolve("empty"), PackLookup::NotFound));
}

#[test]
fn malformed_manifest_is_not_found() {
    let (_dir, paths) = common::temp_home();
    let root = paths.packs_dir.join("broken");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("pack.json"), "{ \"categories\": 5 }").unwrap();

    let mut resolver = PackResolver::new(&paths.packs_dir);
    assert!(matches!(resolver.resolve("broken"), PackLookup::NotFound));
}

#[test]
fn pack_names_cannot_escape_the_root() {
    let (_dir, paths) = common::temp_home();
    common::write_current_pack(&paths.root, "outside", &[("task.error", &["x.wav"])]);

    let mut resolver = PackResolver::new(&paths.packs_dir);
    assert!(matches!(resolver.resolve("../outside"), PackLookup::NotFound));
    assert!(matches!(resolver.resolve(".."), PackLookup::NotFound));
}

#[test]
fn current_schema_wins_over_legacy() {
    let (_dir, paths) = common::temp_home();
    common::write_legacy_pack(&paths.packs_dir, "both", &[("complete", &["old.wav"])]);
    common::write_current_pack(&paths.packs_dir, "both", &[("task.error", &["new.wav"])]);

    let mut resolver = PackResolver::new(&paths.packs_dir);
    let PackLookup::Found(pack) = resolver.resolve("both") else {
        panic!("pack should resolve");
    };
    assert_eq!(pack.schema, Schema::Current);
    assert!(pack.manifest.sounds(Category::TaskComplete).is_empty());
    assert_eq!(pack.manifest.sounds(Category::TaskError).len(), 1);
}

#[test]
fn legacy_keys_migrate_to_canonical_names() {
    let (_dir, paths) = common::temp_home();
    common::write_legacy_pack(
        &paths.packs_dir,
        "classic",
        &[
            ("greeting", &["hello.wav"]),
            ("acknowledge", &["yes.wav"]),
            ("complete", &["done.wav"]),
            ("error", &["oops.wav"]),
            ("permission", &["hey.wav"]),
            ("resource_limit", &["full.wav"]),
            ("annoyed", &["stop.wav"]),
            ("victory_dance", &["dance.wav"]),
        ],
    );

    let mut resolver = PackResolver::new(&paths.packs_dir);
    let PackLookup::Found(pack) = resolver.resolve("classic") else {
        panic!("pack should resolve");
    };
    assert_eq!(pack.schema, Schema::Legacy);
    assert_eq!(pack.manifest.categories.len(), Category::ALL.len());
    assert_eq!(
        pack.manifest.sounds(Category::InputRequired)[0].file_id,
        "sounds/hey.wav"
    );
    assert_eq!(pack.manifest.sound_count(), 7);
}

#[test]
fn legacy_and_current_normalize_identically() {
    let (_dir, paths) = common::temp_home();
    common::write_legacy_pack(
        &paths.packs_dir,
        "legacy",
        &[("complete", &["done.wav", "finished.wav"]), ("permission", &["hey.wav"])],
    );
    common::write_current_pack(
        &paths.packs_dir,
        "current",
        &[
            ("task.complete", &["sounds/done.wav", "sounds/finished.wav"]),
            ("input.required", &["sounds/hey.wav"]),
        ],
    );

    let legacy = RawManifest::read(&paths.packs_dir.join("legacy"))
        .unwrap()
        .unwrap()
        .normalize();
    let current = RawManifest::read(&paths.packs_dir.join("current"))
        .unwrap()
        .unwrap()
        .normalize();
    assert_eq!(legacy.categories, current.categories);
}

#[test]
fn empty_category_is_treated_as_absent() {
    let (_dir, paths) = common::temp_home();
    common::write_current_pack(
        &paths.packs_dir,
        "sparse",
        &[("task.complete", &[]), ("task.error", &["sounds/err.wav"])],
    );

    let mut resolver = PackResolver::new(&paths.packs_dir);
    let PackLookup::Found(pack) = resolver.resolve("sparse") else {
        panic!("pack should resolve");
    };
    assert!(!pack.manifest.categories.contains_key(&Category::TaskComplete));
    assert!(pack.manifest.sounds(Category::TaskComplete).is_empty());
}

#[test]
fn resolved_packs_are_cached() {
    let (_dir, paths) = common::temp_home();
    common::write_current_pack(&paths.packs_dir, "peon", &[("task.complete", &["a.wav"])]);

    let mut resolver = PackResolver::new(&paths.packs_dir);
    assert!(matches!(resolver.resolve("peon"), PackLookup::Found(_)));

    fs::remove_dir_all(paths.packs_dir.join("peon")).unwrap();
    assert!(matches!(resolver.resolve("peon"), PackLookup::Found(_)));
}

#[test]
fn sound_paths_stay_inside_the_pack() {
    let (_dir, paths) = common::temp_home();
    common::touch(&paths.packs_dir.join("secret.wav"));
    common::write_current_pack(&paths.packs_dir, "sneaky", &[("task.complete", &["ok.wav"])]);
    let root = paths.packs_dir.join("sneaky");
    fs::write(
        root.join("pack.json"),
        r#"{"categories":{"task.complete":{"sounds":[{"file":"ok.wav"},{"file":"../secret.wav"},{"file":"gone.wav"}]}}}"#,
    )
    .unwrap();

    let mut resolver = PackResolver::new(&paths.packs_dir);
    let PackLookup::Found(pack) = resolver.resolve("sneaky") else {
        panic!("pack should resolve");
    };
    let sounds = pack.manifest.sounds(Category::TaskComplete);
    assert!(pack.sound_path(&sounds[0]).is_some());
    assert!(pack.sound_path(&sounds[1]).is_none());
    assert!(pack.sound_path(&sounds[2]).is_none());
}

#[test]
fn list_packs_reports_installed_packs() {
    let (_dir, paths) = common::temp_home();
    common::write_current_pack(&paths.packs_dir, "zeta", &[("task.complete", &["a.wav", "b.wav"])]);
    common::write_legacy_pack(&paths.packs_dir, "alpha", &[("greeting", &["hi.wav"])]);
    fs::create_dir_all(paths.packs_dir.join("not-a-pack")).unwrap();

    let packs = pack::list_packs(&paths.packs_dir).unwrap();
    let names: Vec<_> = packs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["alpha", "zeta"]);
    assert_eq!(packs[0].schema, Schema::Legacy);
    assert_eq!(packs[1].sounds, 2);

    assert!(pack::list_packs(&paths.root.join("nowhere")).unwrap().is_empty());
}
