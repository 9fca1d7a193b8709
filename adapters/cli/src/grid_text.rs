use anyhow::{bail, ensure, Result};
use overgrowth_core::GridLayout;

/// Parses a text grid of `0` (blocked) and `1` (walkable) rows. Blank lines
/// and whitespace inside rows are ignored; every row must hold the same
/// number of markers.
pub(crate) fn parse(text: &str) -> Result<GridLayout> {
    let mut columns: Option<usize> = None;
    let mut markers = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for character in line.chars() {
            match character {
                '0' => row.push(0u8),
                '1' => row.push(1u8),
                other if other.is_whitespace() => {}
                other => bail!(
                    "line {}: unexpected character '{other}'; grids use only '0' and '1'",
                    number + 1
                ),
            }
        }

        match columns {
            None => columns = Some(row.len()),
            Some(expected) => ensure!(
                row.len() == expected,
                "line {}: row holds {} markers but earlier rows hold {expected}",
                number + 1,
                row.len()
            ),
        }
        markers.extend(row);
    }

    let Some(columns) = columns else {
        bail!("grid file holds no rows");
    };
    ensure!(columns > 0, "grid rows are empty");
    Ok(GridLayout::new(columns as u32, markers))
}

/// Renders a layout back into the text form accepted by [`parse`].
pub(crate) fn render(layout: &GridLayout) -> String {
    let columns = layout.columns().max(1) as usize;
    let mut out = String::new();
    for row in layout.markers().chunks(columns) {
        for &marker in row {
            out.push(if marker == 0 { '0' } else { '1' });
        }
        out.push('\n');
    }
    out
}
