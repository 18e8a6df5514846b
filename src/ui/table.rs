use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::views::table::{Column, SortSpec, TableSnapshot};

const ROW_HEIGHT: f32 = 18.0;

/// What the user did inside the data table this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableAction {
    Sort(Column),
    Page(usize),
}

/// Sortable, paginated table. Returns at most one action per frame.
pub fn data_table(
    ui: &mut Ui,
    table: &TableSnapshot,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
) -> Option<TableAction> {
    if table.is_empty() {
        ui.label("No rows.");
        return None;
    }

    let mut action = None;
    let order = table.sorted_order(sort);
    let pages = table.page_count(page_size);
    let rows = table.page(&order, page, page_size);

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(page > 0, egui::Button::new("◀")).clicked() {
            action = Some(TableAction::Page(page - 1));
        }
        ui.label(format!("Page {} of {pages}", page.min(pages - 1) + 1));
        if ui
            .add_enabled(page + 1 < pages, egui::Button::new("▶"))
            .clicked()
        {
            action = Some(TableAction::Page(page + 1));
        }
        ui.label(RichText::new(format!("{} rows", table.len())).weak());
    });

    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(TableColumn::auto().at_least(48.0), table.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui: &mut Ui| {
                        let arrow = match sort {
                            Some(s) if s.column == *col && s.ascending => " ▲",
                            Some(s) if s.column == *col => " ▼",
                            _ => "",
                        };
                        let label = RichText::new(format!("{}{arrow}", col.header())).strong();
                        if ui.button(label).clicked() {
                            action = Some(TableAction::Sort(*col));
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let cells = &table.rows[rows[row.index()]];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });

    action
}

/// Every row at once in a scrolling grid.
pub fn data_grid(ui: &mut Ui, table: &TableSnapshot) {
    egui::ScrollArea::both()
        .id_salt("data_grid_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("data_grid")
                .striped(true)
                .min_col_width(48.0)
                .show(ui, |ui: &mut Ui| {
                    for col in &table.columns {
                        ui.strong(col.header());
                    }
                    ui.end_row();
                    for cells in &table.rows {
                        for cell in cells {
                            ui.label(cell.to_string());
                        }
                        ui.end_row();
                    }
                });
        });
}
