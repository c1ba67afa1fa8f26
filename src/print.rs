use crate::components::standings_table::{MAX_NAME_WIDTH, table_lines};
use crate::state::app_state::{TitledTable, standings_tables};
use favale_engine::{Category, Gender, Tournament};
use serde::Serialize;

/// Every division that has at least one team, with its tables.
#[derive(Debug, Serialize)]
pub struct Section {
    pub gender: Gender,
    pub category: Category,
    pub tables: Vec<TitledTable>,
}

pub fn sections(tournament: &Tournament) -> Vec<Section> {
    let mut out = Vec::new();
    for gender in Gender::ALL {
        for category in Category::ALL {
            let has_teams = tournament
                .teams
                .iter()
                .any(|t| t.gender == gender && t.category == category);
            if !has_teams {
                continue;
            }
            out.push(Section {
                gender,
                category,
                tables: standings_tables(tournament, category, gender),
            });
        }
    }
    out
}

pub fn render_text(tournament: &Tournament) -> String {
    let mut out = String::new();
    for section in sections(tournament) {
        out.push_str(&format!(
            "== {} {} ==\n\n",
            section.category.label(),
            section.gender.label()
        ));
        for table in &section.tables {
            out.push_str(&table.title);
            out.push('\n');
            if table.rows.is_empty() {
                out.push_str("  Sin equipos\n\n");
                continue;
            }
            for line in table_lines(&table.rows, MAX_NAME_WIDTH) {
                out.push_str(line.trim_end());
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_json(tournament: &Tournament) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sections(tournament))
}

#[cfg(test)]
mod tests {
    use super::*;
    use favale_engine::client::load_embedded_seed;

    #[test]
    fn seed_has_three_female_divisions() {
        let seed = load_embedded_seed().unwrap();
        let found: Vec<(Gender, Category)> =
            sections(&seed).iter().map(|s| (s.gender, s.category)).collect();
        assert_eq!(
            found,
            vec![
                (Gender::Female, Category::Sub12),
                (Gender::Female, Category::Sub13),
                (Gender::Female, Category::Sub16),
            ]
        );
    }

    #[test]
    fn text_lists_cup_tables_for_sub13() {
        let seed = load_embedded_seed().unwrap();
        let text = render_text(&seed);
        assert!(text.contains("== Sub 12 Femenino =="));
        assert!(text.contains("== Sub 13 Femenino =="));
        assert!(text.contains("Copa Oro\n"));
        assert!(text.contains("Copa Plata\n"));
        assert!(!text.contains("Masculino"));
    }

    #[test]
    fn json_uses_wire_labels() {
        let seed = load_embedded_seed().unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&seed).unwrap()).unwrap();
        assert_eq!(json[0]["gender"], "Femenino");
        assert_eq!(json[0]["category"], "Sub 12");
        assert_eq!(json[0]["tables"][0]["title"], "Sub 12 Femenino");
        assert_eq!(json[0]["tables"][0]["rows"][0]["points"], 0);
        assert!(json[0]["tables"][0].get("marksQualifiers").is_none());
    }
}
