use crate::domain::grid::ActivityGrid;
use crate::domain::window::WORK_DAYS;
use crate::utils::fmt_date;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::{OwoColorize, XtermColors};
use std::collections::HashMap;

const LEGEND_NAME_WIDTH: usize = 20;

/// Project -> color index, handed out 1, 2, 3, ... on first sight.
#[derive(Debug, Default)]
pub struct ColorTable {
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_assign(&mut self, project: &str) -> usize {
        if let Some(&i) = self.index.get(project) {
            return i;
        }
        self.order.push(project.to_string());
        let i = self.order.len();
        self.index.insert(project.to_string(), i);
        i
    }

    /// (project, color index) in assignment order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order.iter().enumerate().map(|(i, p)| (p.as_str(), i + 1))
    }
}

/// 256-color palette slot for an index; 0 (black) is never used.
fn palette(index: usize) -> u8 {
    ((index - 1) % 255 + 1) as u8
}

pub fn marker(index: usize) -> String {
    " X ".on_color(XtermColors::from(palette(index))).to_string()
}

pub fn swatch(index: usize) -> String {
    "   ".on_color(XtermColors::from(palette(index))).to_string()
}

/// Week rows x Monday..Friday columns, one marker per active project.
pub fn grid_table(grid: &ActivityGrid, colors: &mut ColorTable) -> Table {
    let mut header = vec!["Week"];
    header.extend(WORK_DAYS);

    let mut t = Table::new();
    t.load_preset(UTF8_FULL).set_header(header);

    for week in grid.weeks() {
        let mut row = vec![fmt_date(week)];
        for day in WORK_DAYS {
            let cell: String = grid
                .day(week, day)
                .into_iter()
                .flat_map(|projects| projects.keys())
                .map(|project| marker(colors.get_or_assign(project)))
                .collect();
            row.push(cell);
        }
        t.add_row(row);
    }
    t
}

pub fn legend(colors: &ColorTable) -> String {
    let mut out = String::from("Legend:\n");
    for (project, index) in colors.entries() {
        out.push_str(&format!(
            "\t{:<w$.w$} : {}\n",
            project,
            swatch(index),
            w = LEGEND_NAME_WIDTH
        ));
    }
    out
}

/// Table, blank line, legend. Callers handle the empty grid themselves.
pub fn render_report(grid: &ActivityGrid) -> String {
    let mut colors = ColorTable::new();
    let table = grid_table(grid, &mut colors);
    format!("{table}\n\n{}", legend(&colors))
}
