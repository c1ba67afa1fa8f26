use favale_engine::TableRow;
use favale_engine::cup::{GOLD_RANKS, SILVER_RANKS};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

/// Widest team name shown before truncation.
pub const MAX_NAME_WIDTH: usize = 18;
const MIN_NAME_WIDTH: usize = 6;
/// "  #" + name + the numeric columns.
const NUMBERS_WIDTH: usize = 27;

/// Header plus one line per row, fixed width. Shared by the widget and the
/// plain-text printer.
pub fn table_lines(rows: &[TableRow], name_width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:>2} {:<name_width$} {:>2} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3}",
        "#", "Equipo", "PJ", "PG", "PP", "SF", "SC", "DS", "PTS"
    ));
    for (idx, row) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>2} {:<name_width$} {:>2} {:>2} {:>2} {:>2} {:>2} {:>+3} {:>3}",
            idx + 1,
            fit(&row.team_name, name_width),
            row.played,
            row.won,
            row.lost,
            row.sets_won,
            row.sets_lost,
            row.set_difference(),
            row.points,
        ));
    }
    lines
}

/// Name column width that fits `available` cells.
pub fn name_width_for(available: u16) -> usize {
    (available as usize)
        .saturating_sub(NUMBERS_WIDTH)
        .clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH)
}

fn fit(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut s: String = name.chars().take(width.saturating_sub(1)).collect();
    s.push('…');
    s
}

pub struct StandingsTable<'a> {
    pub title: &'a str,
    pub rows: &'a [TableRow],
    /// Colour the gold and silver qualifying ranks.
    pub marks_qualifiers: bool,
}

impl StandingsTable<'_> {
    fn row_style(&self, rank: usize) -> Style {
        if self.marks_qualifiers && GOLD_RANKS.contains(&rank) {
            Style::default().fg(Color::Yellow)
        } else if self.marks_qualifiers && SILVER_RANKS.contains(&rank) {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::White)
        }
    }
}

impl Widget for StandingsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bold = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        buf.set_string(area.x, area.y, self.title, bold);

        if self.rows.is_empty() {
            if area.height > 1 {
                buf.set_string(area.x, area.y + 1, "Sin equipos", Style::default().fg(Color::DarkGray));
            }
            return;
        }

        let width = area.width as usize;
        let lines = table_lines(self.rows, name_width_for(area.width));
        for (idx, line) in lines.iter().enumerate() {
            let y = area.y + 1 + idx as u16;
            if y >= area.y + area.height {
                break;
            }
            let style = if idx == 0 {
                Style::default().fg(Color::DarkGray)
            } else {
                self.row_style(idx - 1)
            };
            let clipped: String = line.chars().take(width).collect();
            buf.set_string(area.x, y, clipped, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, won: u32, lost: u32, points: u32) -> TableRow {
        TableRow {
            team_id: name.to_lowercase(),
            team_name: name.into(),
            played: won + lost,
            won,
            lost,
            sets_won: won * 2,
            sets_lost: lost * 2,
            points,
        }
    }

    fn line_at(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn lines_align_under_the_header() {
        let lines = table_lines(&[row("Galicia", 2, 0, 6), row("Muni A", 0, 2, 0)], 10);
        assert_eq!(lines[0], " # Equipo     PJ PG PP SF SC  DS PTS");
        assert_eq!(lines[1], " 1 Galicia     2  2  0  4  0  +4   6");
        assert_eq!(lines[2], " 2 Muni A      2  0  2  0  4  -4   0");
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn long_names_are_cut() {
        let lines = table_lines(&[row("Tolke Turquesa", 1, 0, 3)], 8);
        assert!(lines[1].contains("Tolke T…"));
    }

    #[test]
    fn name_width_is_clamped() {
        assert_eq!(name_width_for(10), MIN_NAME_WIDTH);
        assert_eq!(name_width_for(40), 13);
        assert_eq!(name_width_for(200), MAX_NAME_WIDTH);
    }

    #[test]
    fn widget_draws_title_and_rows() {
        let area = Rect::new(0, 0, 45, 5);
        let mut buf = Buffer::empty(area);
        let rows = [row("Imago", 1, 0, 3)];
        StandingsTable { title: "Zona A", rows: &rows, marks_qualifiers: true }.render(area, &mut buf);

        assert_eq!(line_at(&buf, 0), "Zona A");
        assert!(line_at(&buf, 2).starts_with(" 1 Imago"));
        assert_eq!(buf[(3, 2)].fg, Color::Yellow);
    }

    #[test]
    fn empty_table_says_so() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        StandingsTable { title: "Copa Oro", rows: &[], marks_qualifiers: false }.render(area, &mut buf);
        assert_eq!(line_at(&buf, 1), "Sin equipos");
    }
}
