//! Integration tests for the `grimoire` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const SAVE_FILE: &str = "ldvelh_data_web_v1.json";

fn grimoire(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("grimoire").unwrap();
    cmd.env("GRIMOIRE_DATA_DIR", dir.path())
        .env_remove("GRIMOIRE_SEED")
        .env_remove("GRIMOIRE_STORAGE_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(["--seed", "7"]);
    cmd
}

fn save(dir: &TempDir) -> Value {
    let text = fs::read_to_string(dir.path().join(SAVE_FILE)).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// The live character of the active profile, read back from disk.
fn character(dir: &TempDir) -> Value {
    let blob = save(dir);
    let active = blob["activeId"].clone();
    blob["profiles"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == active)
        .unwrap()["data"]
        .clone()
}

fn rolled(dir: &TempDir) {
    grimoire(dir).args(["roll", "--yes"]).assert().success();
}

// ---------------------------------------------------------------------------
// sheet
// ---------------------------------------------------------------------------

#[test]
fn sheet_starts_first_adventure() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .arg("sheet")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Aventure 1")
                .and(predicate::str::contains("Poignard"))
                .and(predicate::str::contains("Provisions: 4"))
                .and(predicate::str::contains("Pack (1/10)")),
        );

    let blob = save(&dir);
    assert_eq!(blob["version"], 1);
    assert_eq!(blob["profiles"].as_array().unwrap().len(), 1);
}

#[test]
fn data_dir_flag_overrides_environment() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();
    grimoire(&env_dir)
        .args(["--data-dir", flag_dir.path().to_str().unwrap(), "sheet"])
        .assert()
        .success();

    assert!(flag_dir.path().join(SAVE_FILE).exists());
    assert!(!env_dir.path().join(SAVE_FILE).exists());
}

#[test]
fn corrupt_save_is_backed_up() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(SAVE_FILE), "{ this is not json").unwrap();

    grimoire(&dir)
        .arg("sheet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aventure 1"));

    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("ldvelh_data_web_v1.corrupt-"))
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "{ this is not json");
}

#[test]
fn unreadable_save_is_left_alone() {
    let dir = TempDir::new().unwrap();
    // A directory where the save file should be cannot be read as one.
    fs::create_dir(dir.path().join(SAVE_FILE)).unwrap();

    grimoire(&dir)
        .args(["gold", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read the save"));

    assert!(dir.path().join(SAVE_FILE).is_dir());
}

#[test]
fn invalid_storage_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .env("GRIMOIRE_STORAGE_KEY", "../escape")
        .arg("sheet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid storage key"));
}

// ---------------------------------------------------------------------------
// roll and stats
// ---------------------------------------------------------------------------

#[test]
fn roll_with_yes_rolls_stats() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["roll", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New character:"));

    let c = character(&dir);
    let skill = c["skill"]["init"].as_i64().unwrap();
    let stamina = c["stamina"]["init"].as_i64().unwrap();
    let luck = c["luck"]["init"].as_i64().unwrap();
    assert!((7..=12).contains(&skill));
    assert!((14..=24).contains(&stamina));
    assert!((7..=12).contains(&luck));
    assert_eq!(c["stamina"]["cur"], c["stamina"]["init"]);
}

#[test]
fn declined_roll_changes_nothing() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .arg("roll")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    assert_eq!(character(&dir)["skill"]["init"], 0);
}

#[test]
fn stat_changes_are_capped() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);

    grimoire(&dir)
        .args(["stat", "stamina", "-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stamina: 0/"));

    grimoire(&dir)
        .args(["stat", "endurance", "500"])
        .assert()
        .success();
    let c = character(&dir);
    assert_eq!(c["stamina"]["cur"], c["stamina"]["init"]);
}

#[test]
fn unknown_stat_is_rejected() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["stat", "charisma", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stat"));
}

#[test]
fn luck_without_luck_fails() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .arg("luck")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no luck left"));
}

#[test]
fn luck_spends_a_point() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);
    let before = character(&dir)["luck"]["cur"].as_i64().unwrap();

    grimoire(&dir)
        .arg("luck")
        .assert()
        .success()
        .stdout(predicate::str::contains("Luck is now"));

    assert_eq!(character(&dir)["luck"]["cur"].as_i64().unwrap(), before - 1);
}

#[test]
fn gold_floors_at_zero() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["gold", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold: 5"));
    grimoire(&dir)
        .args(["gold", "-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold: 0"));
}

#[test]
fn provisions_can_be_eaten() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["provisions", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Provisions: 3"));
}

// ---------------------------------------------------------------------------
// inventory
// ---------------------------------------------------------------------------

#[test]
fn pack_holds_ten_things() {
    let dir = TempDir::new().unwrap();
    for i in 0..9 {
        grimoire(&dir)
            .args(["item", "add", &format!("Trinket {i}")])
            .assert()
            .success();
    }

    grimoire(&dir)
        .args(["item", "add", "Lantern"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pack is full"));

    assert_eq!(character(&dir)["items"].as_array().unwrap().len(), 9);
}

#[test]
fn item_removal_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir).args(["item", "add", "Rope"]).assert().success();
    let id = character(&dir)["items"][0]["id"].to_string();

    grimoire(&dir)
        .args(["item", "remove", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
    assert_eq!(character(&dir)["items"].as_array().unwrap().len(), 1);

    grimoire(&dir)
        .args(["item", "remove", &id])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped Rope"));
    assert!(character(&dir)["items"].as_array().unwrap().is_empty());
}

#[test]
fn removing_unknown_item_fails() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["item", "remove", "42", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no item with id 42"));
}

#[test]
fn weapons_train_up_to_potential() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["weapon", "add", "Sabre", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sabre (-2/2)"));
    let id = character(&dir)["weapons"][1]["id"].to_string();

    for _ in 0..3 {
        grimoire(&dir).args(["weapon", "train", &id]).assert().success();
    }
    grimoire(&dir)
        .args(["weapon", "train", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sabre (+2/2) (mastered)"));

    grimoire(&dir)
        .args(["weapon", "remove", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped Sabre"));
}

// ---------------------------------------------------------------------------
// history, notes, heptagram
// ---------------------------------------------------------------------------

#[test]
fn history_add_and_list() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["history", "add", "127", "--combat", "--choice", "-n", "bridge troll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 127 recorded"));

    grimoire(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("127")
                .and(predicate::str::contains("combat, choice"))
                .and(predicate::str::contains("bridge troll")),
        );
}

#[test]
fn history_needs_a_chapter_label() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["history", "add", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chapter label must not be empty"));
}

#[test]
fn history_remove_and_clear() {
    let dir = TempDir::new().unwrap();
    for chap in ["1", "2", "3"] {
        grimoire(&dir).args(["history", "add", chap]).assert().success();
    }
    let id = character(&dir)["history"][0]["id"].to_string();

    grimoire(&dir)
        .args(["history", "remove", &id, "--yes"])
        .assert()
        .success();
    assert_eq!(character(&dir)["history"].as_array().unwrap().len(), 2);

    grimoire(&dir)
        .args(["history", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared."));
    grimoire(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No chapters recorded."));
}

#[test]
fn notes_round_trip() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["notes", "the password is 'swordfish'"])
        .assert()
        .success();
    grimoire(&dir)
        .arg("notes")
        .assert()
        .success()
        .stdout(predicate::str::contains("the password is 'swordfish'"));
}

#[test]
fn heptagram_slots() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["heptagram", "3", "moon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3: moon"));

    grimoire(&dir)
        .args(["heptagram", "7", "sun"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slot 7 does not exist"));
}

// ---------------------------------------------------------------------------
// combat log
// ---------------------------------------------------------------------------

#[test]
fn manual_combat_entries() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir).args(["combats", "add"]).assert().success();
    let id = character(&dir)["combats"][0]["id"].to_string();

    grimoire(&dir)
        .args(["combats", "edit", &id, "--enemy", "Wolf", "--skill", "7", "--stamina", "6"])
        .assert()
        .success();
    grimoire(&dir)
        .args(["combats", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wolf is dead"));

    grimoire(&dir)
        .args(["combats", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wolf").and(predicate::str::contains("yes")));

    grimoire(&dir)
        .args(["combats", "remove", &id, "--yes"])
        .assert()
        .success();
    grimoire(&dir)
        .args(["combats", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No fights recorded."));
}

// ---------------------------------------------------------------------------
// profiles
// ---------------------------------------------------------------------------

#[test]
fn last_profile_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir).arg("sheet").assert().success();
    let id = save(&dir)["activeId"].to_string();

    grimoire(&dir)
        .args(["profile", "delete", &id, "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete the last adventure"));
}

#[test]
fn profiles_are_independent() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir).args(["gold", "12"]).assert().success();
    let first = save(&dir)["activeId"].to_string();

    grimoire(&dir)
        .args(["profile", "new", "Deathtrap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deathtrap"));
    assert_eq!(character(&dir)["gold"], 0);

    grimoire(&dir)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aventure 1").and(predicate::str::contains("Deathtrap")));

    grimoire(&dir)
        .args(["profile", "switch", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now playing Aventure 1"));
    assert_eq!(character(&dir)["gold"], 12);

    grimoire(&dir)
        .args(["profile", "rename", &first, "Forest"])
        .assert()
        .success();
    grimoire(&dir)
        .args(["profile", "delete", &first, "--yes"])
        .assert()
        .success();

    let blob = save(&dir);
    let profiles = blob["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["name"], "Deathtrap");
}

// ---------------------------------------------------------------------------
// fight
// ---------------------------------------------------------------------------

#[test]
fn dead_enemy_is_a_victory() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);

    grimoire(&dir)
        .args(["fight", "--enemy", "Rat", "--skill", "2", "--stamina", "0"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Victory!"));

    let c = character(&dir);
    assert_eq!(c["combats"][0]["enemy"], "Rat");
    assert_eq!(c["combats"][0]["result"], "victory");
    assert_eq!(c["combats"][0]["dead"], true);
}

#[test]
fn unrolled_character_loses_at_once() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["fight", "--enemy", "Ogre", "--skill", "9", "--stamina", "12"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Defeat."));

    assert_eq!(character(&dir)["combats"][0]["result"], "defeat");
}

#[test]
fn rounds_are_reported() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);

    grimoire(&dir)
        .args(["fight", "--enemy", "Orc", "--skill", "6", "--stamina", "20"])
        .write_stdin("a\ns\nw none\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Round 1:")
                .and(predicate::str::contains("Orc: stamina"))
                .and(predicate::str::contains("Fighting bare-handed"))
                .and(predicate::str::contains("The fight is abandoned.")),
        );

    assert!(character(&dir)["combats"].as_array().unwrap().is_empty());
}

#[test]
fn fleeing_logs_nothing() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);

    grimoire(&dir)
        .args(["fight", "--enemy", "Orc", "--skill", "6", "--stamina", "20"])
        .write_stdin("f\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You fled from Orc."));

    assert!(character(&dir)["combats"].as_array().unwrap().is_empty());
}

#[test]
fn luck_before_a_round_is_refused() {
    let dir = TempDir::new().unwrap();
    rolled(&dir);

    grimoire(&dir)
        .args(["fight", "--enemy", "Orc", "--skill", "6", "--stamina", "20"])
        .write_stdin("l\nx\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("luck can only be tested once")
                .and(predicate::str::contains("unknown command: x")),
        );
}

#[test]
fn fight_with_unknown_weapon_fails() {
    let dir = TempDir::new().unwrap();
    grimoire(&dir)
        .args(["fight", "--enemy", "Orc", "--skill", "6", "--stamina", "5", "--weapon", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no weapon with id 1"));
}
