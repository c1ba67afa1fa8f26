use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::standings_table::StandingsTable;
use crate::state::app_state::{TitledTable, filter_label, standings_tables};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use favale_engine::fixture::{day_label, filter_matches, group_by_date, set_score, team_matches, team_mvps};
use favale_engine::{Category, Gender, Match, Team, Tournament};

static TABS: &[&str; 3] = &["Standings", "Fixture", "Teams"];

const HELP_TEXT: &str = "q=quit  1=Standings  2=Fixture  3=Teams  ?=help  Esc=back
c=cycle category  g=cycle gender  j/k=scroll or select  /=search  r=reload
f=full screen  \"=logs";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Fixture => draw_fixture(f, layout.main, app),
            MenuItem::Teams => draw_teams(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Fixture => 1,
        MenuItem::Teams => 2,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Fixture => 1,
            MenuItem::Teams => 2,
            MenuItem::Standings | MenuItem::Help => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" source ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.state.source_label.as_str()),
    ];
    if let Some(updated) = app.state.last_updated.as_deref() {
        spans.push(Span::styled("  updated ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(updated));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        spans.push(Span::styled(format!("  {err}"), Style::default().fg(Color::Red)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Message shown in place of tab content until the first snapshot lands.
fn not_loaded(f: &mut Frame, area: Rect, app: &App) {
    let msg = if let Some(err) = app.state.last_error.as_deref() {
        format!("Tournament load failed:\n{err}\n\nPress r to retry")
    } else {
        "Loading tournament data...".to_string()
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let category = app.state.standings.category;
    let gender = app.state.standings.gender;
    let block = default_border(Color::White)
        .title(format!(" Standings | {} | {} ", category.label(), gender.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(tournament) = app.state.tournament.as_ref() else {
        not_loaded(f, inner, app);
        return;
    };

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: c=category  g=gender  r=reload  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let tables = standings_tables(tournament, category, gender);
    match tables.as_slice() {
        [single] => render_table(f, content, single),
        [zone_a, zone_b, gold, silver] => {
            let [top, bottom] =
                Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(content);
            let [top_left, top_right] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(top);
            let [bottom_left, bottom_right] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(bottom);
            render_table(f, top_left, zone_a);
            render_table(f, top_right, zone_b);
            render_table(f, bottom_left, gold);
            render_table(f, bottom_right, silver);
        }
        other => {
            let constraints = vec![Constraint::Fill(1); other.len()];
            let areas = Layout::vertical(constraints).split(content);
            for (table, pane) in other.iter().zip(areas.iter()) {
                render_table(f, *pane, table);
            }
        }
    }
}

fn render_table(f: &mut Frame, area: Rect, table: &TitledTable) {
    let pane = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
    f.render_widget(
        StandingsTable {
            title: &table.title,
            rows: &table.rows,
            marks_qualifiers: table.marks_qualifiers,
        },
        pane,
    );
}

fn filters_line(category: Option<Category>, gender: Option<Gender>, search: &str, searching: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Categoria ", Style::default().fg(Color::DarkGray)),
        Span::raw(filter_label(category, Category::label)),
        Span::styled("  Rama ", Style::default().fg(Color::DarkGray)),
        Span::raw(filter_label(gender, Gender::label)),
        Span::styled("  Buscar ", Style::default().fg(Color::DarkGray)),
    ];
    if searching {
        spans.push(Span::styled(format!("{search}_"), Style::default().fg(Color::Yellow)));
    } else if search.is_empty() {
        spans.push(Span::styled("/", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(search.to_string()));
    }
    Line::from(spans)
}

fn draw_fixture(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Fixture ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(tournament) = app.state.tournament.as_ref() else {
        not_loaded(f, inner, app);
        return;
    };

    let fixture = &app.state.fixture;
    let [filters, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(filters_line(fixture.category, fixture.gender, &fixture.search, app.state.searching)),
        filters,
    );

    let matches = filter_matches(&tournament.matches, &tournament.teams, &fixture.filter());
    if matches.is_empty() {
        f.render_widget(
            Paragraph::new("No hay partidos para este filtro")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (date, day) in group_by_date(&matches) {
        lines.push(Line::from(Span::styled(
            day_label(date),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for m in day {
            let style = if m.is_finished {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!("  {}", match_summary(m, tournament)), style)));
        }
        lines.push(Line::from(""));
    }

    let offset = (fixture.scroll_offset as usize).min(lines.len().saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(offset).collect();
    f.render_widget(Paragraph::new(visible), content);
}

/// "17:00  Cancha 4 (Favale)  Sub 12  Muni A 2-1 Galicia  (25-20 18-25 15-10)  Clasificatoria"
fn match_summary(m: &Match, tournament: &Tournament) -> String {
    let home = tournament.team_name(&m.home_team_id);
    let away = tournament.team_name(&m.away_team_id);
    let score = if m.is_finished {
        let (h, a) = set_score(m);
        format!("{h}-{a}")
    } else {
        "vs".to_string()
    };

    let mut text = format!("{}  {}  {}  {home} {score} {away}", m.time, m.court, m.category.label());
    if m.is_finished && !m.sets.is_empty() {
        let sets: Vec<String> = m.sets.iter().map(|s| format!("{}-{}", s.home, s.away)).collect();
        text.push_str(&format!("  ({})", sets.join(" ")));
    }
    if let Some(stage) = m.stage.as_deref() {
        text.push_str("  ");
        text.push_str(stage);
    }
    text
}

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Teams ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(tournament) = app.state.tournament.as_ref() else {
        not_loaded(f, inner, app);
        return;
    };

    let teams_state = &app.state.teams;
    let [filters, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(filters_line(
            teams_state.category,
            teams_state.gender,
            &teams_state.search,
            app.state.searching,
        )),
        filters,
    );

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)]).areas(content);

    let visible = teams_state.visible(&tournament.teams);
    let selected = teams_state.selected_team(&tournament.teams);
    let rows = list_area.height as usize;
    let first = teams_state.selected.saturating_sub(rows.saturating_sub(1));
    let list: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(first)
        .take(rows)
        .map(|(idx, team)| {
            let is_selected = idx == teams_state.selected;
            let marker = if is_selected { ">" } else { " " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{marker} {} ({})", team.name, team.category.label()),
                style,
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(list), list_area);

    let detail_block = default_border(Color::DarkGray);
    let detail_inner = detail_block.inner(detail_area);
    f.render_widget(detail_block, detail_area);
    match selected {
        Some(team) => f.render_widget(Paragraph::new(team_detail_lines(team, tournament)), detail_inner),
        None => f.render_widget(
            Paragraph::new("No hay equipos para este filtro")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            detail_inner,
        ),
    }
}

fn team_detail_lines<'a>(team: &'a Team, tournament: &'a Tournament) -> Vec<Line<'a>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(team.name.as_str(), heading)),
        Line::from(Span::styled(
            format!("{} | {} | {}", team.category.label(), team.gender.label(), team.zone.label()),
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled("Plantel", heading)),
    ];
    if team.players.is_empty() {
        lines.push(Line::from(Span::styled("  Sin jugadoras cargadas", dim)));
    }
    for p in &team.players {
        let position = if p.position.is_empty() { String::new() } else { format!(" ({})", p.position) };
        lines.push(Line::from(format!("  #{:<3} {}{position}", p.number, p.name)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Partidos", heading)));
    let matches = team_matches(&tournament.matches, &team.id);
    if matches.is_empty() {
        lines.push(Line::from(Span::styled("  Sin partidos", dim)));
    }
    for m in matches {
        let opponent_id = if m.home_team_id == team.id { &m.away_team_id } else { &m.home_team_id };
        let result = if m.is_finished {
            let (h, a) = set_score(m);
            let (ours, theirs) = if m.home_team_id == team.id { (h, a) } else { (a, h) };
            format!("{ours}-{theirs}")
        } else {
            "--".to_string()
        };
        lines.push(Line::from(format!(
            "  {} {}  vs {}  {result}",
            m.date.format("%d/%m"),
            m.time,
            tournament.team_name(opponent_id)
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("MVPs", heading)));
    let mvps = team_mvps(&tournament.matches, team);
    if mvps.is_empty() {
        lines.push(Line::from(Span::styled("  Sin menciones aun", dim)));
    }
    for (m, player) in mvps {
        lines.push(Line::from(format!(
            "  #{} {}  MVP del partido ({})",
            player.number,
            player.name,
            m.date.format("%d/%m")
        )));
    }
    lines
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::White))
        .style_debug(Style::default().fg(Color::Gray))
        .style_trace(Style::default().fg(Color::DarkGray));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use favale_engine::client::load_embedded_seed;
    use favale_engine::SetResult;

    #[test]
    fn pending_match_summary() {
        let seed = load_embedded_seed().unwrap();
        let m = &seed.matches[0];
        assert_eq!(
            match_summary(m, &seed),
            "17:00  Cancha 4 (Favale)  Sub 12  Muni A vs Galicia  Clasificatoria"
        );
    }

    #[test]
    fn finished_match_summary_lists_sets() {
        let seed = load_embedded_seed().unwrap();
        let mut m = seed.matches[1].clone();
        m.is_finished = true;
        m.sets = vec![SetResult { home: 25, away: 20 }, SetResult { home: 25, away: 23 }];
        assert_eq!(
            match_summary(&m, &seed),
            "18:30  Cancha 4 (Favale)  Sub 13  Muni A 2-0 Tolke  (25-20 25-23)  Grupo B"
        );
    }

    #[test]
    fn team_detail_without_roster() {
        let seed = load_embedded_seed().unwrap();
        let team = seed.find_team("t17").unwrap();
        let text: Vec<String> = team_detail_lines(team, &seed)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], "Galicia");
        assert!(text.contains(&"  Sin jugadoras cargadas".to_string()));
        assert!(text.iter().any(|l| l.contains("vs Boxing")));
    }
}
