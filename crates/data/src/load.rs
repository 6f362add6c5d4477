use crate::schema::{EngineConfig, PuzzleFile};
use anyhow::{bail, Context};
use pokergrid_core::{Card, Cells, ConditionKind, Grid, LineConditions, PuzzleFixture, GRID_SIZE};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const BUILTIN_PROTOTYPE: &str = include_str!("../puzzles/prototype.json");

pub fn load_puzzle(path: &Path) -> anyhow::Result<PuzzleFile> {
    load_json(path)
}

pub fn parse_puzzle(raw: &str) -> anyhow::Result<PuzzleFile> {
    serde_json::from_str(raw).context("parse puzzle JSON")
}

/// Reads a puzzle file and converts it into a construction fixture.
pub fn load_fixture(path: &Path) -> anyhow::Result<PuzzleFixture> {
    load_puzzle(path)?
        .into_fixture()
        .with_context(|| format!("invalid puzzle {}", path.display()))
}

/// The prototype puzzle shipped with the engine.
pub fn builtin_puzzle() -> PuzzleFixture {
    parse_puzzle(BUILTIN_PROTOTYPE)
        .and_then(PuzzleFile::into_fixture)
        .expect("built-in prototype.json must be valid")
}

pub fn load_engine_config(path: &Path) -> anyhow::Result<EngineConfig> {
    load_json(path)
}

impl PuzzleFile {
    pub fn into_fixture(self) -> anyhow::Result<PuzzleFixture> {
        let rows = condition_slots(&self.rows, "row")?;
        let columns = condition_slots(&self.columns, "column")?;

        if self.layout.len() != GRID_SIZE {
            bail!(
                "layout must have {GRID_SIZE} rows, found {}",
                self.layout.len()
            );
        }
        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (row, tokens) in self.layout.iter().enumerate() {
            cells[row] = parse_row(row, tokens)?;
        }

        Ok(PuzzleFixture {
            name: self.name,
            layout: Grid::from_rows(cells),
            conditions: LineConditions::new(rows, columns),
            rules: self.rules,
        })
    }
}

fn condition_slots(
    values: &[ConditionKind],
    label: &str,
) -> anyhow::Result<[ConditionKind; GRID_SIZE]> {
    values.try_into().map_err(|_| {
        anyhow::anyhow!(
            "expected {GRID_SIZE} {label} conditions, found {}",
            values.len()
        )
    })
}

fn parse_row(row: usize, tokens: &[Option<String>]) -> anyhow::Result<Cells> {
    if tokens.len() != GRID_SIZE {
        bail!(
            "layout row {row} must have {GRID_SIZE} cells, found {}",
            tokens.len()
        );
    }
    let mut cells: Cells = [None; GRID_SIZE];
    for (col, token) in tokens.iter().enumerate() {
        let Some(token) = token else { continue };
        let card: Card = token
            .parse()
            .with_context(|| format!("card at row {row}, column {col}"))?;
        cells[col] = Some(card);
    }
    Ok(cells)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
