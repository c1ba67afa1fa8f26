pub mod standings_table;
