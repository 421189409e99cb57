pub mod grid;
pub mod tooltip;

pub use grid::{DayCell, ScheduleTier, build_day_cells, generate_year_grid, weeks};
pub use tooltip::compose_tooltip;
