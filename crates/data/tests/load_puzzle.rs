use pokergrid_core::{validate_puzzle, ConditionKind, Puzzle, PuzzleError, ValidationIssue};
use pokergrid_data::{builtin_puzzle, load_engine_config, load_fixture, parse_puzzle};
use std::path::PathBuf;

fn puzzles_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("puzzles")
}

const LAYOUT: &str = r#"[
    ["As", "Ks", "Qs", "Js", "10s"],
    ["8s", "8h", "8d", "2h", "3h"],
    ["8c", "Kh", "Qh", "Jh", "4h"],
    ["Kd", "9h", "9d", "6h", "7h"],
    ["10h", "10d", "9c", "6c", "7c"]
]"#;

fn puzzle_json(rows: &str, columns: &str, layout: &str) -> String {
    format!(r#"{{ "name": "test", "rows": {rows}, "columns": {columns}, "layout": {layout} }}"#)
}

#[test]
fn prototype_file_matches_builtin() {
    let fixture = load_fixture(&puzzles_root().join("prototype.json")).expect("load prototype");
    assert_eq!(fixture, builtin_puzzle());
}

#[test]
fn builtin_puzzle_validates_cleanly() {
    let fixture = builtin_puzzle();
    let report = validate_puzzle(&fixture.layout, &fixture.conditions, fixture.rules);
    assert!(report.is_valid(), "issues: {:?}", report.issues);
    let puzzle = Puzzle::new(fixture).expect("puzzle");
    assert!(puzzle.is_solved());
}

#[test]
fn condition_ids_deserialize_in_snake_case() {
    let raw = puzzle_json(
        r#"["all_hearts", "three_queens", "ascending_sequence", "four_sevens", "all_face_cards"]"#,
        r#"["three_of_a_kind", "sum_equals", "poker_hand", "all_same_rank", "descending"]"#,
        LAYOUT,
    );
    let fixture = parse_puzzle(&raw)
        .and_then(|file| file.into_fixture())
        .expect("fixture");
    assert_eq!(fixture.conditions.rows[2], ConditionKind::AscendingSequence);
    assert_eq!(fixture.conditions.columns[1], ConditionKind::SumEquals);

    let report = validate_puzzle(&fixture.layout, &fixture.conditions, fixture.rules);
    assert!(report
        .issues
        .contains(&ValidationIssue::Unsatisfied(pokergrid_core::Line::Row(0))));
}

#[test]
fn null_cells_become_empty_and_are_reported() {
    let layout = LAYOUT.replacen("\"As\"", "null", 1);
    let raw = puzzle_json(
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        &layout,
    );
    let fixture = parse_puzzle(&raw)
        .and_then(|file| file.into_fixture())
        .expect("fixture");
    assert_eq!(fixture.layout.card_count(), 24);
    let report = validate_puzzle(&fixture.layout, &fixture.conditions, fixture.rules);
    assert!(report.issues.contains(&ValidationIssue::CardCount {
        expected: 25,
        found: 24
    }));
}

#[test]
fn rejects_wrong_condition_count() {
    let raw = puzzle_json(r#"["pair"]"#, r#"["pair", "pair", "pair", "pair", "pair"]"#, LAYOUT);
    let err = parse_puzzle(&raw)
        .and_then(|file| file.into_fixture())
        .expect_err("short rows");
    assert!(err.to_string().contains("row conditions"), "{err:#}");
}

#[test]
fn rejects_unknown_card_tokens() {
    let layout = LAYOUT.replacen("\"Kd\"", "\"Xd\"", 1);
    let raw = puzzle_json(
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        &layout,
    );
    let err = parse_puzzle(&raw)
        .and_then(|file| file.into_fixture())
        .expect_err("bad card");
    assert!(format!("{err:#}").contains("row 3, column 0"), "{err:#}");
}

#[test]
fn rejects_unknown_conditions() {
    let raw = puzzle_json(
        r#"["pair", "pair", "full_house", "pair", "pair"]"#,
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        LAYOUT,
    );
    assert!(parse_puzzle(&raw).is_err());
}

#[test]
fn duplicate_cards_fail_puzzle_construction() {
    let layout = LAYOUT.replacen("\"7c\"", "\"As\"", 1);
    let raw = puzzle_json(
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        r#"["pair", "pair", "pair", "pair", "pair"]"#,
        &layout,
    );
    let fixture = parse_puzzle(&raw)
        .and_then(|file| file.into_fixture())
        .expect("fixture");
    assert!(matches!(
        Puzzle::new(fixture),
        Err(PuzzleError::DuplicateCard(_))
    ));
}

#[test]
fn engine_config_fills_defaults() {
    let dir = std::env::temp_dir().join(format!("pokergrid-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("engine.json");
    std::fs::write(&path, r#"{ "search": { "trials": 12 } }"#).expect("write config");

    let config = load_engine_config(&path).expect("config");
    assert_eq!(config.search.trials, 12);
    assert_eq!(config.search.stop_at, None);
    assert_eq!(config.seed, None);

    std::fs::remove_dir_all(&dir).ok();
}
