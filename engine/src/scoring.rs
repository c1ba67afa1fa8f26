//! Competition points awarded for a finished match.
//!
//! Which categories play best-of-3 and which play best-of-5 is data held in a
//! [`FormatTable`], so a new category only needs a new entry.

use crate::Category;
use serde::Serialize;

/// Competition points for each side of one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchPoints {
    pub home: u32,
    pub away: u32,
}

impl MatchPoints {
    pub const NONE: MatchPoints = MatchPoints { home: 0, away: 0 };

    pub fn total(&self) -> u32 {
        self.home + self.away
    }

    fn flipped(self) -> Self {
        MatchPoints { home: self.away, away: self.home }
    }
}

/// Points given out when a side wins, seen from the winner's side
/// (`home` = winner, `away` = loser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsSchema {
    /// Loser took at most `sets_to_win - 2` sets.
    pub clear_win: MatchPoints,
    /// Loser took `sets_to_win - 1` sets.
    pub close_win: MatchPoints,
}

pub const STANDARD_SCHEMA: PointsSchema = PointsSchema {
    clear_win: MatchPoints { home: 3, away: 0 },
    close_win: MatchPoints { home: 2, away: 1 },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    pub sets_to_win: u32,
    pub schema: PointsSchema,
}

impl FormatRule {
    pub const BEST_OF_3: FormatRule = FormatRule { sets_to_win: 2, schema: STANDARD_SCHEMA };
    pub const BEST_OF_5: FormatRule = FormatRule { sets_to_win: 3, schema: STANDARD_SCHEMA };

    pub fn label(&self) -> String {
        format!("best of {}", self.sets_to_win * 2 - 1)
    }

    /// Points for a set tally. A tally where nobody reached exactly
    /// `sets_to_win`, or where both did, earns nothing for either side.
    pub fn points(&self, home_sets: u32, away_sets: u32) -> MatchPoints {
        let target = self.sets_to_win;
        let winner_view = |loser_sets: u32| {
            if loser_sets + 1 == target {
                self.schema.close_win
            } else {
                self.schema.clear_win
            }
        };

        if home_sets == target && away_sets < target {
            winner_view(away_sets)
        } else if away_sets == target && home_sets < target {
            winner_view(home_sets).flipped()
        } else {
            MatchPoints::NONE
        }
    }
}

/// Category → match format lookup. Categories without an entry fall back to
/// the table's default rule (best-of-3 unless changed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    entries: Vec<(Category, FormatRule)>,
    fallback: FormatRule,
}

impl Default for FormatTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (Category::Sub12, FormatRule::BEST_OF_3),
                (Category::Sub13, FormatRule::BEST_OF_3),
                (Category::Sub16, FormatRule::BEST_OF_5),
            ],
            fallback: FormatRule::BEST_OF_3,
        }
    }
}

impl FormatTable {
    /// Replace (or add) the rule for one category.
    pub fn with(mut self, category: Category, rule: FormatRule) -> Self {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((category, rule)),
        }
        self
    }

    pub fn rule(&self, category: Category) -> FormatRule {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rule)| *rule)
            .unwrap_or(self.fallback)
    }

    pub fn points_for(&self, category: Category, home_sets: u32, away_sets: u32) -> MatchPoints {
        self.rule(category).points(home_sets, away_sets)
    }
}

/// Points for a finished match under the tournament's standard formats.
pub fn points_for(category: Category, home_sets: u32, away_sets: u32) -> MatchPoints {
    FormatTable::default().points_for(category, home_sets, away_sets)
}
