//! Inline CSS shared by the report tables.

pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; overflow: hidden; \
     font-family: sans-serif; padding: 12px; box-sizing: border-box;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #bbb;"
}

pub fn table_style() -> &'static str {
    "border-collapse: collapse; width: 100%;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; border: 1px solid #bbb; padding: 6px; \
     background: #f2f2f2; cursor: pointer; user-select: none; white-space: nowrap;"
}

pub fn table_cell_style(numeric: bool) -> String {
    let align = if numeric { "right" } else { "left" };
    format!("border: 1px solid #bbb; padding: 6px; text-align: {align};")
}

pub fn colored_cell_style(numeric: bool, color: &str) -> String {
    format!("{} color: {color}; font-weight: 600;", table_cell_style(numeric))
}

pub fn tab_style(active: bool) -> &'static str {
    if active {
        "padding: 6px 12px; border: 1px solid #888; background: #333; color: #fff; cursor: pointer;"
    } else {
        "padding: 6px 12px; border: 1px solid #bbb; background: #fff; color: #333; cursor: pointer;"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_cells_stick_to_top() {
        let style = table_header_cell_style();

        assert!(style.contains("position: sticky"));
        assert!(style.contains("top: 0"));
        assert!(style.contains("z-index"));
    }

    #[test]
    fn table_container_scrolls() {
        let style = table_container_style();

        assert!(style.contains("overflow: auto"));
        assert!(style.contains("flex: 1"));
        assert!(style.contains("min-height: 0"));
    }

    #[test]
    fn numeric_cells_align_right() {
        assert!(table_cell_style(true).contains("text-align: right"));
        assert!(table_cell_style(false).contains("text-align: left"));
        assert!(colored_cell_style(true, "#28a745").contains("color: #28a745"));
    }
}
