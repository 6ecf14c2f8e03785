//! Turns grids and gauges into screen lines.

use crossterm::style::Color;
use staffgrid::grid::{Alignment, Column, SortIndicator};
use staffgrid::progress::{ProgressIndicator, format_percentage};
use staffgrid::{DataGrid, GridRow};

use crate::terminal::{Line, Span, SpanStyle, fit, fit_right};

const GAUGE_WIDTH: usize = 24;
const GAUGE_LABEL_WIDTH: usize = 14;

/// Parses `#rrggbb` into a terminal color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn sort_marker(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Ascending => " ▲",
        SortIndicator::Descending => " ▼",
        SortIndicator::None => "",
    }
}

fn cell(text: &str, column: &Column) -> String {
    let width = column.width as usize;
    match column.align {
        Alignment::Right => fit_right(text, width),
        Alignment::Center => {
            let trimmed = fit(text, width);
            let trimmed = trimmed.trim_end();
            let pad = (width - trimmed.chars().count().min(width)) / 2;
            fit(&format!("{}{}", " ".repeat(pad), trimmed), width)
        }
        Alignment::Left => fit(text, width),
    }
}

/// Renders a grid section: title, header, visible rows and pager.
pub fn grid_lines<T: GridRow>(grid: &DataGrid<T>, title: &str, focused: bool) -> Vec<Line> {
    let accent = SpanStyle::default().fg(Color::Cyan).bold();
    let muted = SpanStyle::default().dim();
    let mut lines = Vec::new();

    let (marker, title_style) = if focused {
        ("▶ ", accent.reverse())
    } else {
        ("  ", accent)
    };
    lines.push(vec![Span::styled(format!("{}{}", marker, title), title_style)]);

    let header: Line = grid
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let label = format!(
                "{}:{}{}",
                i + 1,
                column.header,
                sort_marker(grid.sort_state_for(column))
            );
            let mut style = SpanStyle::default().bold();
            if !column.sortable || !grid.sortable() {
                style = style.dim();
            }
            Span::styled(format!("{} ", cell(&label, column)), style)
        })
        .collect();
    lines.push(header);

    if grid.paged_rows().is_empty() {
        lines.push(vec![Span::styled("  No data", muted)]);
    }
    for row in grid.paged_rows() {
        lines.push(
            grid.columns()
                .iter()
                .map(|column| {
                    let value = row.field(&column.property).to_string();
                    Span::raw(format!("{} ", cell(&value, column)))
                })
                .collect(),
        );
    }

    let size = match grid.page_size().filter(|&s| s > 0) {
        Some(size) => size.to_string(),
        None => "all".to_string(),
    };
    let choices: Vec<String> = grid
        .available_page_sizes()
        .iter()
        .map(|s| s.to_string())
        .collect();
    lines.push(vec![Span::styled(
        format!(
            "  Page {} of {} · {} rows · page size {} [{}]",
            grid.current_page(),
            grid.total_pages(),
            grid.row_count(),
            size,
            choices.join(" ")
        ),
        muted,
    )]);

    lines
}

/// Renders a progress indicator as a horizontal gauge.
pub fn gauge_line(label: &str, indicator: &ProgressIndicator) -> Line {
    let filled = (indicator.fraction() * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    let mut bar = SpanStyle::default();
    if let Some(color) = hex_color(indicator.color()) {
        bar = bar.fg(color);
    }

    vec![
        Span::raw(format!("  {}", fit(label, GAUGE_LABEL_WIDTH))),
        Span::styled("█".repeat(filled), bar),
        Span::styled("░".repeat(GAUGE_WIDTH - filled), SpanStyle::default().dim()),
        Span::raw(format!(" {}", format_percentage(indicator.progress()))),
    ]
}

#[cfg(test)]
mod tests {
    use staffgrid::Row;
    use staffgrid::grid::GridFactory;

    use super::*;
    use crate::terminal::line_text;

    #[test]
    fn test_hex_color() {
        assert_eq!(
            hex_color("#28a745"),
            Some(Color::Rgb {
                r: 0x28,
                g: 0xa7,
                b: 0x45
            })
        );
        assert_eq!(hex_color(""), None);
        assert_eq!(hex_color("#12"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_grid_lines_show_sort_and_pager() {
        let mut grid: DataGrid<Row> = GridFactory::new().create().with_columns(vec![
            Column::new("id", "ID").width(8).align(Alignment::Right),
            Column::new("name", "Name").width(10),
        ]);
        grid.configure(
            vec![
                Row::new().set("id", 2).set("name", "B"),
                Row::new().set("id", 1).set("name", "A"),
                Row::new().set("id", 3),
            ],
            Some(2),
            true,
        );
        grid.sort_by("id");

        let lines = grid_lines(&grid, "People", true);
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text[0], "▶ People");
        assert!(text[1].contains("1:ID ▲"));
        assert_eq!(text[2], "       1 A          ");
        assert_eq!(text[3], "       2 B          ");
        assert!(text[4].contains("Page 1 of 2 · 3 rows · page size 2 [2 5 10 15 25 50]"));
    }

    #[test]
    fn test_empty_grid_shows_placeholder() {
        let grid: DataGrid<Row> = GridFactory::new().create();
        let lines = grid_lines(&grid, "Nothing", false);
        assert!(line_text(&lines[2]).contains("No data"));
    }

    #[test]
    fn test_gauge_fill() {
        let mut ring = ProgressIndicator::new();
        ring.set_progress(50.0);
        let line = gauge_line("HR", &ring);
        assert_eq!(line[1].text.chars().count(), GAUGE_WIDTH / 2);
        assert!(line_text(&line).ends_with(" 50%"));
    }
}
