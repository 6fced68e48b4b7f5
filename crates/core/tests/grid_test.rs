//! Tests for grid inference on hand-built token layouts.

use tablegrid_core::grid::{
    Cell, Grid, GridSettings, PathBox, Region, Token, extract_grid, map_cells, map_tokens,
};

fn tok(x0: f64, y0: f64, x1: f64, y1: f64, text: &str) -> Token {
    Token::new(x0, y0, x1, y1, text, 0)
}

fn scenario_tokens() -> Vec<Token> {
    vec![tok(0.0, 0.0, 10.0, 10.0, "A"), tok(50.0, 0.0, 60.0, 10.0, "B")]
}

fn with_col_gap(min_col_gap: f64) -> GridSettings {
    GridSettings {
        min_col_gap,
        ..GridSettings::default()
    }
}

fn positions(grid: &Grid) -> Vec<(usize, usize, &str)> {
    grid.cells
        .iter()
        .map(|c| (c.row_idx, c.col_idx, c.text.as_str()))
        .collect()
}

#[test]
fn test_whitespace_gap_splits_columns() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let grid = extract_grid(&scenario_tokens(), &[], &region, &with_col_gap(20.0));

    assert_eq!(grid.columns, vec![0.0, 30.0, 100.0]);
    assert_eq!(grid.rows, vec![0.0, 20.0]);
    assert_eq!(positions(&grid), vec![(0, 0, "A"), (0, 1, "B")]);
}

#[test]
fn test_narrow_gap_keeps_single_column() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let grid = extract_grid(&scenario_tokens(), &[], &region, &with_col_gap(50.0));

    assert_eq!(grid.columns, vec![0.0, 100.0]);
    assert_eq!(positions(&grid), vec![(0, 0, "A B")]);
}

#[test]
fn test_ruling_line_overrides_gap_width() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let paths = [PathBox::new(30.0, 0.0, 30.0, 20.0)];
    let grid = extract_grid(&scenario_tokens(), &paths, &region, &with_col_gap(50.0));

    assert_eq!(grid.columns, vec![0.0, 30.0, 100.0]);
    assert_eq!(positions(&grid), vec![(0, 0, "A"), (0, 1, "B")]);
}

#[test]
fn test_tight_leading_is_one_row() {
    let region = Region::new(0.0, 0.0, 100.0, 40.0);
    let tokens = vec![
        tok(0.0, 5.0, 40.0, 15.0, "wrapped"),
        tok(0.0, 16.0, 30.0, 26.0, "text"),
    ];
    let settings = GridSettings {
        min_row_gap: Some(4.0),
        ..GridSettings::default()
    };
    let grid = extract_grid(&tokens, &[], &region, &settings);

    assert_eq!(grid.rows, vec![0.0, 40.0]);
    assert_eq!(positions(&grid), vec![(0, 0, "wrapped text")]);
}

#[test]
fn test_empty_tokens_give_empty_grid() {
    let region = Region::new(5.0, 10.0, 95.0, 70.0);
    let grid = extract_grid(&[], &[], &region, &GridSettings::default());

    assert_eq!(
        grid,
        Grid {
            columns: vec![5.0, 95.0],
            rows: vec![10.0, 70.0],
            cells: Vec::new(),
        }
    );
}

#[test]
fn test_wrapped_rows_with_ruling_lines() {
    // Two logical rows, the first wrapping onto two visual lines. Only the
    // drawn line at y=32 separates the rows.
    let region = Region::new(0.0, 0.0, 200.0, 60.0);
    let tokens = vec![
        tok(5.0, 5.0, 60.0, 15.0, "Deviated"),
        tok(5.0, 17.0, 50.0, 27.0, "well"),
        tok(120.0, 5.0, 140.0, 15.0, "12.5"),
        tok(5.0, 37.0, 45.0, 47.0, "Vertical"),
        tok(120.0, 37.0, 140.0, 47.0, "3.0"),
    ];
    let paths = [
        PathBox::new(0.0, 32.0, 200.0, 32.5),
        PathBox::new(100.0, 0.0, 100.5, 60.0),
    ];
    let settings = GridSettings {
        min_row_gap: None,
        ..GridSettings::default()
    };
    let grid = extract_grid(&tokens, &paths, &region, &settings);

    assert_eq!(grid.columns, vec![0.0, 100.0, 200.0]);
    assert_eq!(grid.rows, vec![0.0, 32.0, 60.0]);
    assert_eq!(
        positions(&grid),
        vec![
            (0, 0, "Deviated well"),
            (0, 1, "12.5"),
            (1, 0, "Vertical"),
            (1, 1, "3.0"),
        ]
    );
}

#[test]
fn test_cell_bbox_comes_from_boundaries() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let grid = extract_grid(&scenario_tokens(), &[], &region, &with_col_gap(20.0));

    assert_eq!(
        grid.cells[1],
        Cell {
            row_idx: 0,
            col_idx: 1,
            text: "B".to_string(),
            bbox: (30.0, 0.0, 100.0, 20.0),
        }
    );
}

#[test]
fn test_straddling_token_is_not_duplicated() {
    let columns = [0.0, 30.0, 100.0];
    let rows = [0.0, 20.0];
    let tokens = vec![tok(20.0, 0.0, 40.0, 10.0, "half")];
    let mapping = map_tokens(&tokens, &columns, &rows);

    assert_eq!(mapping.cells.len(), 1);
    assert_eq!(mapping.cells[0].col_idx, 0);
    assert_eq!(mapping.unassigned, 0);
}

#[test]
fn test_swapped_region_corners() {
    let region = Region::new(100.0, 20.0, 0.0, 0.0);
    let grid = extract_grid(&scenario_tokens(), &[], &region, &with_col_gap(20.0));
    assert_eq!(grid.columns, vec![0.0, 30.0, 100.0]);
    assert_eq!(grid.rows, vec![0.0, 20.0]);
}

#[test]
fn test_remapping_boundaries_reproduces_cells() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let tokens = scenario_tokens();
    let first = extract_grid(&tokens, &[], &region, &with_col_gap(20.0));
    let second = extract_grid(&tokens, &[], &region, &with_col_gap(20.0));

    assert_eq!(first, second);
    assert_eq!(map_cells(&tokens, &first.columns, &first.rows), first.cells);
}

#[test]
fn test_grid_json_shape() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let grid = extract_grid(&scenario_tokens(), &[], &region, &with_col_gap(20.0));
    let json = serde_json::to_string(&grid).unwrap();

    insta::assert_snapshot!(json, @r#"{"columns":[0.0,30.0,100.0],"rows":[0.0,20.0],"cells":[{"row_idx":0,"col_idx":0,"text":"A","bbox":[0.0,0.0,30.0,20.0]},{"row_idx":0,"col_idx":1,"text":"B","bbox":[30.0,0.0,100.0,20.0]}]}"#);

    let back: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn test_ruling_line_left_of_first_token() {
    let region = Region::new(0.0, 0.0, 100.0, 20.0);
    let tokens = vec![tok(30.0, 0.0, 40.0, 10.0, "A"), tok(60.0, 0.0, 70.0, 10.0, "B")];
    let paths = [PathBox::new(10.0, 0.0, 10.0, 20.0)];
    let grid = extract_grid(&tokens, &paths, &region, &with_col_gap(50.0));

    assert_eq!(grid.columns, vec![0.0, 10.0, 100.0]);
    assert_eq!(positions(&grid), vec![(0, 1, "A B")]);
}
